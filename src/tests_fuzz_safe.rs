//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs (elles font partie du contrat : "Error: …"),
//!   mais JAMAIS de panic, jamais de cible mémoire ni de valeur sur erreur
//! - invariant clé : une valeur rendue est toujours finie, et le rendu sci
//!   de cette valeur respecte la borne de mantisse

use std::time::{Duration, Instant};

use crate::eval::evaluer_expression;
use crate::format::{decimal_vers_fraction_mixte, formater, nettoyer};
use crate::modes::{FormatSortie, ModeAngle, Options};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(100)),
        3 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        4 => format!("{}%", rng.pick(200)),
        _ => format!("{}", 1 + rng.pick(6)),
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => gen_nombre(rng),
        2 => "π".to_string(),
        3 => "e".to_string(),
        4 => format!("√({})", gen_nombre(rng)),
        _ => format!("{}!", rng.pick(8)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(10) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}^{})", gen_nombre(rng), rng.pick(5)),
        6 => format!("sin({})", gen_expr(rng, depth - 1)),
        7 => format!("cos({})", gen_expr(rng, depth - 1)),
        8 => format!("ln({})", gen_expr(rng, depth - 1)),
        _ => {
            // parenthèse volontairement non fermée : l'équilibrage la répare
            if rng.coin() {
                format!("({}+{}", gen_expr(rng, depth - 1), gen_atome(rng))
            } else {
                format!("√({}", gen_nombre(rng))
            }
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_jamais_de_panic_et_contrat_erreur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let o = Options::default();

    let mut vus_ok = 0usize;
    let mut vus_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let r = evaluer_expression(&expr, &o);

        if r.affichage.starts_with("Error: ") {
            // contrat d'erreur : rien d'autre ne sort
            assert_eq!(r.memoire, None, "expr={expr:?}");
            assert_eq!(r.valeur, None, "expr={expr:?}");
            vus_err += 1;
        } else {
            let v = r.valeur.unwrap_or_else(|| panic!("expr={expr:?}"));
            assert!(v.is_finite(), "valeur non finie pour {expr:?}");
            vus_ok += 1;
        }
    }

    // on veut un mix des deux, sinon le fuzz ne balaye rien
    assert!(vus_ok > 30, "trop peu de succès: {vus_ok}");
    assert!(vus_err > 0, "aucune erreur vue: fuzz trop sage");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let o = Options::default();

    // même seed => mêmes expressions => mêmes sorties
    let mut rng_a = Rng::new(0xBADC0DE_u64);
    let mut rng_b = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let ea = gen_expr(&mut rng_a, 4);
        let eb = gen_expr(&mut rng_b, 4);
        assert_eq!(ea, eb);

        let ra = evaluer_expression(&ea, &o);
        let rb = evaluer_expression(&eb, &o);
        assert_eq!(ra, rb, "non déterministe pour {ea:?}");
    }
}

#[test]
fn fuzz_safe_sci_mantisse_sur_valeurs_tirees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0xFACADE_u64);

    for _ in 0..200 {
        budget(t0, max);

        // valeur synthétique sur une large dynamique
        let mantisse = 1.0 + (rng.pick(9000) as f64) / 1000.0;
        let expo = rng.pick(21) as i32 - 10;
        let signe = if rng.coin() { 1.0 } else { -1.0 };
        let v = nettoyer(signe * mantisse * 10f64.powi(expo));
        if v == 0.0 {
            continue;
        }

        let aff = formater(v, FormatSortie::Sci, None);
        let (m, _e) = aff
            .split_once("x10^")
            .unwrap_or_else(|| panic!("forme sci attendue: {aff:?}"));
        let m: f64 = m.parse().unwrap_or_else(|_| panic!("mantisse illisible: {aff:?}"));
        assert!(
            (1.0..10.0).contains(&m.abs()),
            "mantisse hors borne: v={v} aff={aff:?}"
        );
    }
}

#[test]
fn fuzz_safe_fractions_approximation_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng = Rng::new(0x5EED_u64);
    let o = Options::default();

    for _ in 0..150 {
        budget(t0, max);

        let entier = rng.pick(50) as f64;
        let frac = (1 + rng.pick(998)) as f64 / 1000.0;
        let v = entier + frac;

        let rendu = decimal_vers_fraction_mixte(v);

        // re-parse du rendu par le pipeline : l'approximation à dénominateur
        // ≤ 1000 reste à moins de 1e-3 de la valeur
        let r = evaluer_expression(&rendu, &o);
        let lu = r
            .valeur
            .unwrap_or_else(|| panic!("rendu illisible {rendu:?} : {}", r.affichage));
        assert!(
            (lu - v).abs() < 1e-3,
            "approximation trop lâche: v={v} rendu={rendu:?} lu={lu}"
        );
    }
}

#[test]
fn fuzz_safe_modes_et_hyp_ne_paniquent_pas() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xA11CE_u64);

    for _ in 0..120 {
        budget(t0, max);

        let mode = match rng.pick(3) {
            0 => ModeAngle::Rad,
            1 => ModeAngle::Deg,
            _ => ModeAngle::Grd,
        };
        let o = Options {
            mode,
            hyp: rng.coin(),
            format: match rng.pick(3) {
                0 => FormatSortie::Flo,
                1 => FormatSortie::Sci,
                _ => FormatSortie::Eng,
            },
            decimales: if rng.coin() { Some(rng.pick(6) as usize) } else { None },
            ..Options::default()
        };

        let expr = format!("sin({})", gen_expr(&mut rng, 2));
        let r = evaluer_expression(&expr, &o);
        if let Some(v) = r.valeur {
            assert!(v.is_finite(), "expr={expr:?}");
        } else {
            assert!(r.affichage.starts_with("Error: "), "expr={expr:?}");
        }
    }
}
