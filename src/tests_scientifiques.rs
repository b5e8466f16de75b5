//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les invariants d'affichage et de pipeline sans faire
//! chauffer la machine.
//! - budget temps global
//! - tailles bornées (longueur d'expression, balayages de valeurs)
//!
//! Invariants clés :
//! - sci : mantisse dans [1, 10) sauf le cas zéro "0x10^0"
//! - eng : exposant multiple de 3
//! - entier ≤ 10 chiffres en flo : chaîne décimale exacte
//! - fraction mixte : aller-retour W┘N/D (D ≤ 1000, forme réduite)
//! - erreurs : toujours "Error: …", jamais de cible mémoire ni de valeur

use std::time::{Duration, Instant};

use crate::eval::evaluer_expression;
use crate::modes::{FormatSortie, ModeAngle, Options};

fn opts() -> Options {
    Options::default()
}

fn eval_ok(expr: &str, o: &Options) -> (String, f64) {
    let r = evaluer_expression(expr, o);
    let v = r
        .valeur
        .unwrap_or_else(|| panic!("expr={expr:?} err={}", r.affichage));
    (r.affichage, v)
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// "Mx10^E" -> (M, E). None si la forme n'y est pas.
fn decompose_exposant(s: &str) -> Option<(f64, i32)> {
    let (m, e) = s.split_once("x10^")?;
    Some((m.parse().ok()?, e.parse().ok()?))
}

/* ------------------------ Invariants de notation ------------------------ */

#[test]
fn sci_mantisse_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let sci = Options {
        format: FormatSortie::Sci,
        ..opts()
    };

    for expr in [
        "1", "9", "10", "99", "123", "1234", "0.5", "0.001", "123456789", "3.75",
        "2^30", "10^8", "1/3", "-42", "-0.004", "7!",
    ] {
        budget(t0, max);
        let (aff, _v) = eval_ok(expr, &sci);
        let (m, _e) = decompose_exposant(&aff)
            .unwrap_or_else(|| panic!("forme sci attendue pour {expr:?}, reçu {aff:?}"));
        assert!(
            (1.0..10.0).contains(&m.abs()),
            "mantisse hors [1,10) : expr={expr:?} aff={aff:?}"
        );
    }

    // cas zéro
    let (aff, _) = eval_ok("0", &sci);
    assert_eq!(aff, "0x10^0");
}

#[test]
fn eng_exposant_multiple_de_trois() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let eng = Options {
        format: FormatSortie::Eng,
        ..opts()
    };

    for expr in [
        "1", "12", "123", "1234", "12345", "123456", "0.5", "0.05", "0.005",
        "0.0005", "2^20", "1/7", "-9999",
    ] {
        budget(t0, max);
        let (aff, _v) = eval_ok(expr, &eng);
        let (m, e) = decompose_exposant(&aff)
            .unwrap_or_else(|| panic!("forme eng attendue pour {expr:?}, reçu {aff:?}"));
        assert_eq!(e.rem_euclid(3), 0, "exposant non multiple de 3 : {aff:?}");
        assert!(
            (1.0..1000.0).contains(&m.abs()),
            "mantisse hors [1,1000) : {aff:?}"
        );
    }
}

#[test]
fn flo_entier_chaine_exacte() {
    // un entier ≤ 10 chiffres en flo redonne sa chaîne décimale
    for (expr, attendu) in [
        ("7", "7"),
        ("0", "0"),
        ("-7", "-7"),
        ("1024", "1024"),
        ("999999999", "999999999"),
        ("1234567890", "1234567890"),
        ("2+2", "4"),
    ] {
        let (aff, _) = eval_ok(expr, &opts());
        assert_eq!(aff, attendu, "expr={expr:?}");
    }
}

#[test]
fn flo_arithmetique_infixe_standard() {
    // sans glyphe calculatrice, l'évaluation suit l'infixe usuel
    for (expr, attendu) in [
        ("1+2*3", 7.0),
        ("(1+2)*3", 9.0),
        ("2^3^2", 512.0),
        ("10/4", 2.5),
        ("10-2-3", 5.0),
        ("-3^2", -9.0),
    ] {
        let (_aff, v) = eval_ok(expr, &opts());
        assert!((v - attendu).abs() < 1e-9, "expr={expr:?} v={v}");
    }
}

/* ------------------------ Fractions : aller-retour ------------------------ */

#[test]
fn fraction_mixte_aller_retour() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // (W, N, D) réduits, D ≤ 1000
    let cas = [
        (1i64, 1i64, 2i64),
        (3, 1, 4),
        (2, 2, 3),
        (10, 7, 8),
        (5, 3, 1000),
        (1, 1, 999),
        (42, 5, 6),
    ];

    for (w, n, d) in cas {
        budget(t0, max);
        // l'entrée mixte sans directive ressort en mixte : aller-retour direct
        let expr = format!("{w}┘{n}/{d}");
        let r = evaluer_expression(&expr, &opts());
        assert_eq!(r.affichage, expr, "aller-retour raté");
        let attendu = w as f64 + n as f64 / d as f64;
        assert!((r.valeur.unwrap() - attendu).abs() < 1e-9);
    }
}

#[test]
fn fraction_directions_de_conversion() {
    // mixte + ►f↔d -> décimal ; décimal + ►f↔d -> fraction
    let (aff, _) = eval_ok("1┘1/4►f↔d", &opts());
    assert_eq!(aff, "1.25");
    let (aff, _) = eval_ok("1.25►f↔d", &opts());
    assert_eq!(aff, "1┘1/4");

    // mixte + ►A B/C↔D/E -> impropre ; impropre nue -> mixte
    let (aff, _) = eval_ok("1┘1/4►A B/C↔D/E", &opts());
    assert_eq!(aff, "5/4");
    let (aff, _) = eval_ok("5/4►A B/C↔D/E", &opts());
    assert_eq!(aff, "1┘1/4");
}

/* ------------------------ Angles ------------------------ */

#[test]
fn invariant_pythagoricien_tous_modes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    for mode in [ModeAngle::Rad, ModeAngle::Deg, ModeAngle::Grd] {
        let o = Options { mode, ..opts() };
        for angle in ["0", "10", "45", "60", "90", "123"] {
            budget(t0, max);
            let expr = format!("sin({angle})^2+cos({angle})^2");
            let (_aff, v) = eval_ok(&expr, &o);
            assert!((v - 1.0).abs() < 1e-9, "mode={mode:?} angle={angle}");
        }
    }
}

#[test]
fn angles_remarquables() {
    let deg = Options {
        mode: ModeAngle::Deg,
        ..opts()
    };
    let grd = Options {
        mode: ModeAngle::Grd,
        ..opts()
    };

    assert_eq!(eval_ok("sin(90)", &deg).0, "1");
    assert_eq!(eval_ok("sin(100)", &grd).0, "1");
    assert_eq!(eval_ok("cos(90)", &deg).0, "0");
    assert_eq!(eval_ok("tan(45)", &deg).0, "1");
    assert_eq!(eval_ok("tan(50)", &grd).0, "1");
}

#[test]
fn dms_aller_retour() {
    let deg = Options {
        mode: ModeAngle::Deg,
        ..opts()
    };
    for litteral in ["12°30'45\"", "0°0'1\"", "89°59'59\""] {
        let expr = format!("{litteral}►DMS");
        let r = evaluer_expression(&expr, &deg);
        assert_eq!(r.affichage, litteral, "aller-retour DMS raté");
    }
}

/* ------------------------ Sûreté ------------------------ */

#[test]
fn surete_jetons_interdits() {
    for cas in [
        "import os",
        "exec('x')",
        "eval(2+2)",
        "2+__builtins__",
        "sin(eval)",
        "__",
    ] {
        let r = evaluer_expression(cas, &opts());
        assert!(
            r.affichage.starts_with("Error: "),
            "{cas:?} aurait dû être refusé, reçu {:?}",
            r.affichage
        );
        assert_eq!(r.memoire, None);
        assert_eq!(r.valeur, None);
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn stress_somme_longue_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 200 termes "1/2" : pile du parseur sollicitée sans exploser
    let mut expr = String::new();
    for k in 0..200 {
        if k > 0 {
            expr.push('+');
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    let (aff, v) = eval_ok(&expr, &opts());
    assert_eq!(aff, "100");
    assert!((v - 100.0).abs() < 1e-9);
}

#[test]
fn stress_parentheses_imbriquees_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 60 niveaux de parenthèses, toutes auto-fermées
    let mut expr = String::new();
    for _ in 0..60 {
        expr.push('(');
    }
    expr.push('7');
    budget(t0, max);

    let (aff, _v) = eval_ok(&expr, &opts());
    assert_eq!(aff, "7");
}

#[test]
fn stress_racines_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 2X√(2X√(…(65536)…)) : chaque niveau divise l'exposant par 2
    let expr = "2X√(2X√(2X√(2X√(65536))))";
    budget(t0, max);
    let (_aff, v) = eval_ok(expr, &opts());
    assert!((v - 2.0).abs() < 1e-9, "v={v}");
}
