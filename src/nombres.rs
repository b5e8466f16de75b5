// src/nombres.rs
//
// Moteur de théorie des nombres.
// Trois entrées optionnelles (n > 0, m ≥ 2, a ∈ ℤ) et un recalcul EN BLOC :
// - n posé           -> fonctions dépendant de n
// - n et m posés     -> fonctions dépendant de m et de (n, m)
// - n, m et a posés  -> fonctions dépendant de (a, n, m)
//
// Politique d'erreur : jamais d'erreur — une précondition non remplie
// (m non premier pour Legendre, pgcd ≠ 1 pour l'inverse…) laisse le champ à
// None, que l'UI rend comme « non applicable » (distinct d'un zéro calculé).
//
// Arithmétique : i64 partout, intermédiaires en i128 pour les produits
// modulaires ; BigInt pour les seules quantités qui peuvent déborder
// (somme des diviseurs, ppcm, classes cubiques).

use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::One;
use tracing::debug;

/// Plafond du test de Knödel (balayage brut en O(n·log n)) : au-delà le
/// drapeau reste None plutôt que de bloquer l'appelant.
const KNODEL_MAX: i64 = 100_000;

/// Champ d'entrée du moteur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Champ {
    N,
    M,
    A,
}

/// Résultats dérivés. Un champ None = « non applicable » (entrée absente ou
/// précondition non remplie), jamais une erreur.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultatsNombres {
    // dépendants de n
    pub factorisation: Option<String>,
    pub nb_diviseurs: Option<i64>,
    pub somme_diviseurs: Option<BigInt>,
    pub mobius: Option<i64>,
    pub radical: Option<i64>,
    pub totient: Option<i64>,
    pub carmichael: Option<i64>,
    pub est_premier: Option<bool>,
    pub test_knodel: Option<bool>,

    // dépendants de m
    pub residus_quadratiques: Option<Vec<i64>>,
    pub periode_pisano: Option<i64>,
    pub classes_cubiques: Option<BigInt>,

    // dépendants de (n, m)
    pub pgcd: Option<i64>,
    pub ppcm: Option<BigInt>,
    pub bezout: Option<(i64, i64)>,
    pub inverse_modulaire: Option<i64>,
    pub ordre: Option<i64>,
    pub est_generateur: Option<bool>,
    pub symbole_legendre: Option<i64>,
    pub symbole_jacobi: Option<i64>,

    // dépendants de (a, n, m)
    pub log_discret: Option<i64>,
}

#[derive(Debug, Default)]
pub struct MoteurNombres {
    n: Option<i64>,
    m: Option<i64>,
    a: Option<i64>,
    resultats: ResultatsNombres,
}

impl MoteurNombres {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pose un champ en validant sa contrainte. En cas de refus, l'ancienne
    /// valeur reste en place et le message (texte UI) est retourné.
    pub fn fixer_champ(&mut self, champ: Champ, valeur: i64) -> Result<(), String> {
        match champ {
            Champ::N => {
                if valeur <= 0 {
                    return Err("n doit être un entier naturel".to_string());
                }
                self.n = Some(valeur);
            }
            Champ::M => {
                if valeur < 2 {
                    return Err("m doit être ≥ 2".to_string());
                }
                self.m = Some(valeur);
            }
            Champ::A => self.a = Some(valeur),
        }
        Ok(())
    }

    pub fn effacer_champ(&mut self, champ: Champ) {
        match champ {
            Champ::N => self.n = None,
            Champ::M => self.m = None,
            Champ::A => self.a = None,
        }
    }

    pub fn effacer_tout(&mut self) {
        self.n = None;
        self.m = None;
        self.a = None;
        self.resultats = ResultatsNombres::default();
    }

    pub fn n(&self) -> Option<i64> {
        self.n
    }
    pub fn m(&self) -> Option<i64> {
        self.m
    }
    pub fn a(&self) -> Option<i64> {
        self.a
    }

    pub fn resultats(&self) -> &ResultatsNombres {
        &self.resultats
    }

    /// Recalcul en bloc (pas d'incrémental) : tout est reposé à None puis
    /// recalculé selon les entrées présentes.
    pub fn recalculer(&mut self) {
        self.resultats = ResultatsNombres::default();

        let Some(n) = self.n else { return };
        debug!(n, m = ?self.m, a = ?self.a, "recalcul théorie des nombres");

        self.calcule_dependants_n(n);

        if let Some(m) = self.m {
            self.calcule_dependants_m(m);
            self.calcule_dependants_nm(n, m);

            if let Some(a) = self.a {
                self.calcule_dependants_anm(a, n, m);
            }
        }
    }

    /* ------------------------ dépendants de n ------------------------ */

    fn calcule_dependants_n(&mut self, n: i64) {
        let r = &mut self.resultats;

        // cas particulier n = 1 (le test de Knödel reste non applicable)
        if n == 1 {
            r.factorisation = Some("1".to_string());
            r.est_premier = Some(false);
            r.nb_diviseurs = Some(1);
            r.somme_diviseurs = Some(BigInt::one());
            r.mobius = Some(1);
            r.radical = Some(1);
            r.totient = Some(1);
            r.carmichael = Some(1);
            return;
        }

        let facteurs = factorise(n);

        r.factorisation = Some(formate_factorisation(&facteurs));
        r.est_premier = Some(facteurs.len() == 1 && facteurs[0].1 == 1);

        // τ(n) = ∏(eᵢ+1)
        r.nb_diviseurs = Some(facteurs.iter().map(|&(_, e)| (e as i64) + 1).product());

        // σ(n) = ∏ (pᵢ^(eᵢ+1)-1)/(pᵢ-1)
        let mut sigma = BigInt::one();
        for &(p, e) in &facteurs {
            let p = BigInt::from(p);
            sigma *= (p.pow(e + 1) - 1) / (p - 1);
        }
        r.somme_diviseurs = Some(sigma);

        // μ(n)
        if facteurs.iter().any(|&(_, e)| e > 1) {
            r.mobius = Some(0);
        } else {
            r.mobius = Some(if facteurs.len() % 2 == 1 { -1 } else { 1 });
        }

        // rad(n) = ∏pᵢ
        r.radical = Some(facteurs.iter().map(|&(p, _)| p).product());

        // φ(n), exact sur les entiers : φ = n·∏(1 - 1/pᵢ)
        let mut phi = n;
        for &(p, _) in &facteurs {
            phi = phi / p * (p - 1);
        }
        r.totient = Some(phi);

        // λ(n) : ppcm des contributions par puissance de premier
        let mut lambda = 1i64;
        for &(p, e) in &facteurs {
            let contrib = if p == 2 {
                match e {
                    1 => 1,
                    2 => 2,
                    _ => 1i64 << (e - 2),
                }
            } else {
                (p - 1) * p.pow(e - 1)
            };
            lambda = lambda / pgcd(lambda, contrib) * contrib;
        }
        r.carmichael = Some(lambda);

        // test de Knödel : vrai pour les premiers ; sinon balayage brut
        // a^(n-1) ≡ 1 (mod n) pour tout a premier avec n
        if r.est_premier == Some(true) {
            r.test_knodel = Some(true);
        } else if n <= KNODEL_MAX {
            let mut ok = true;
            for a in 2..n {
                if pgcd(a, n) == 1 && mod_pow(a, n - 1, n) != 1 {
                    ok = false;
                    break;
                }
            }
            r.test_knodel = Some(ok);
        }
    }

    /* ------------------------ dépendants de m ------------------------ */

    fn calcule_dependants_m(&mut self, m: i64) {
        let r = &mut self.resultats;

        // résidus quadratiques : {x² mod m}, trié
        let mut ensemble: Vec<i64> = (0..m).map(|x| mod_mul(x, x, m)).collect();
        ensemble.sort_unstable();
        ensemble.dedup();
        r.residus_quadratiques = Some(ensemble);

        // période de Pisano, plafonnée à m²
        let plafond = (m as i128) * (m as i128);
        let (mut fa, mut fb) = (0i64, 1i64);
        let mut periode: i128 = 0;
        loop {
            periode += 1;
            let suivant = (fa + fb).rem_euclid(m);
            fa = fb;
            fb = suivant;
            if fa == 0 && fb == 1 {
                r.periode_pisano = Some(periode as i64);
                break;
            }
            if periode > plafond {
                break; // reste None
            }
        }

        r.classes_cubiques = Some(classes_cubiques(m));
    }

    /* ------------------------ dépendants de (n, m) ------------------------ */

    fn calcule_dependants_nm(&mut self, n: i64, m: i64) {
        let r = &mut self.resultats;

        let g = pgcd(n, m);
        r.pgcd = Some(g);
        r.ppcm = Some(BigInt::from(n) * m / g);

        // Bezout : nx + my = g, avec minimisation a posteriori de |x|+|y|
        let (_, mut x, mut y) = euclide_etendu(n, m);
        if x != 0 {
            let k = ((x as f64) * (g as f64) / (m as f64)).round() as i64;
            let nx = x - k * (m / g);
            let ny = y + k * (n / g);
            if nx.abs() + ny.abs() < x.abs() + y.abs() {
                x = nx;
                y = ny;
            }
        }
        r.bezout = Some((x, y));

        if g == 1 {
            r.inverse_modulaire = Some(x.rem_euclid(m));

            // ordre multiplicatif, plafonné à m itérations
            let mut ordre = 1i64;
            let mut valeur = n.rem_euclid(m);
            while valeur != 1 {
                valeur = mod_mul(valeur, n.rem_euclid(m), m);
                ordre += 1;
                if ordre > m {
                    break;
                }
            }
            if ordre <= m {
                r.ordre = Some(ordre);
            }

            // générateur ssi ordre = φ(m)
            let mut phi = m;
            for &(p, _) in &factorise(m) {
                phi = phi / p * (p - 1);
            }
            r.est_generateur = Some(r.ordre == Some(phi));
        } else {
            r.est_generateur = Some(false);
        }

        // symbole de Legendre (m premier seulement), critère d'Euler
        if est_premier(m) {
            if n.rem_euclid(m) == 0 {
                r.symbole_legendre = Some(0);
            } else {
                let v = mod_pow(n.rem_euclid(m), (m - 1) / 2, m);
                r.symbole_legendre = Some(if v == m - 1 { -1 } else { v });
            }
        }

        // symbole de Jacobi : m impair ≥ 3, premier ou non
        if m % 2 == 1 && m >= 3 {
            r.symbole_jacobi = Some(jacobi(n, m));
        }
    }

    /* ------------------------ dépendants de (a, n, m) ------------------------ */

    fn calcule_dependants_anm(&mut self, a: i64, n: i64, m: i64) {
        self.resultats.log_discret = log_discret(a, n, m);
    }
}

/* ------------------------ primitives modulaires ------------------------ */

pub(crate) fn pgcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.abs()
}

/// Euclide étendu : rend (g, x, y) avec ax + by = g.
fn euclide_etendu(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        return (b, 0, 1);
    }
    let (g, x, y) = euclide_etendu(b.rem_euclid(a), a);
    (g, y - (b.div_euclid(a)) * x, x)
}

/// (a·b) mod m sans débordement (intermédiaire i128).
fn mod_mul(a: i64, b: i64, m: i64) -> i64 {
    ((a as i128 * b as i128).rem_euclid(m as i128)) as i64
}

/// a^e mod m par carrés successifs.
fn mod_pow(mut base: i64, mut exp: i64, m: i64) -> i64 {
    if m == 1 {
        return 0;
    }
    let mut acc = 1i64;
    base = base.rem_euclid(m);
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mod_mul(acc, base, m);
        }
        exp >>= 1;
        base = mod_mul(base, base, m);
    }
    acc
}

pub(crate) fn est_premier(x: i64) -> bool {
    if x <= 1 {
        return false;
    }
    if x <= 3 {
        return true;
    }
    if x % 2 == 0 || x % 3 == 0 {
        return false;
    }
    let mut i = 5i64;
    while i * i <= x {
        if x % i == 0 || x % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Factorisation par divisions successives jusqu'à √n. (premier, exposant),
/// premiers croissants.
pub(crate) fn factorise(n: i64) -> Vec<(i64, u32)> {
    let mut facteurs = Vec::new();
    let mut reste = n;
    let mut p = 2i64;
    while p * p <= reste {
        if reste % p == 0 {
            let mut e = 0u32;
            while reste % p == 0 {
                reste /= p;
                e += 1;
            }
            facteurs.push((p, e));
        }
        p += 1;
    }
    if reste > 1 {
        facteurs.push((reste, 1));
    }
    facteurs
}

/// "2² · 3" : exposants en surscrits Unicode, facteurs séparés par ·
fn formate_factorisation(facteurs: &[(i64, u32)]) -> String {
    let mut morceaux = Vec::with_capacity(facteurs.len());
    for &(p, e) in facteurs {
        if e > 1 {
            morceaux.push(format!("{p}{}", surscrit(e)));
        } else {
            morceaux.push(format!("{p}"));
        }
    }
    morceaux.join(" · ")
}

fn surscrit(e: u32) -> String {
    const CHIFFRES: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    e.to_string()
        .chars()
        .map(|c| CHIFFRES[(c as u8 - b'0') as usize])
        .collect()
}

/// Symbole de Jacobi (n/m), m impair ≥ 3 — réciprocité quadratique.
fn jacobi(n: i64, m: i64) -> i64 {
    let n = n.rem_euclid(m);
    if n == 0 {
        return if m > 1 { 0 } else { 1 };
    }
    if n == 1 {
        return 1;
    }

    // extrait les facteurs 2
    let mut e = 0u32;
    let mut n1 = n;
    while n1 % 2 == 0 {
        e += 1;
        n1 /= 2;
    }

    let mut s = if e % 2 == 0 {
        1
    } else if m % 8 == 1 || m % 8 == 7 {
        1
    } else {
        -1
    };

    if n1 == 1 {
        return s;
    }
    if m % 4 == 3 && n1 % 4 == 3 {
        s = -s;
    }
    s * jacobi(m % n1, n1)
}

/// Log discret x tel que n^x ≡ a (mod m), pas de bébé / pas de géant.
fn log_discret(a: i64, n: i64, m: i64) -> Option<i64> {
    let a = a.rem_euclid(m);
    let n = n.rem_euclid(m);

    // cas particuliers
    if a == 0 {
        return if n == 0 { Some(0) } else { None };
    }
    if n == 0 {
        return None;
    }
    if n == 1 {
        return if a == 1 { Some(0) } else { None };
    }

    // log mal défini hors du groupe multiplicatif
    if pgcd(n, m) != 1 {
        return None;
    }

    // N = ⌈√m⌉
    let mut nn = (m as f64).sqrt().ceil() as i64;
    while nn * nn < m {
        nn += 1;
    }

    // pas de bébé : table n^j mod m, j ∈ [0, N)
    let mut table: HashMap<i64, i64> = HashMap::with_capacity(nn as usize);
    let mut valeur = 1i64;
    for j in 0..nn {
        table.insert(valeur, j);
        valeur = mod_mul(valeur, n, m);
    }

    // n^(-N) mod m : petit Fermat si m premier, sinon Euclide étendu
    let n_inv = if est_premier(m) {
        mod_pow(n, m - 2, m)
    } else {
        let (_, x, _) = euclide_etendu(n, m);
        x.rem_euclid(m)
    };
    let c = mod_pow(n_inv, nn, m);

    // pas de géant : N+1 multiplications de a par n^(-N) ;
    // a·n^(-Ni) ≡ n^j  =>  x = iN + j
    let mut valeur = a;
    for i in 0..=nn {
        if let Some(&j) = table.get(&valeur) {
            let x = (i as i128 * nn as i128 + j as i128).rem_euclid(m as i128);
            return Some(x as i64);
        }
        valeur = mod_mul(valeur, c, m);
    }

    None
}

/// Nombre de classes cubiques de m : formule multiplicative sur les
/// puissances de premiers, formes closes distinctes pour p=2, p=3, et
/// p quelconque selon p mod 9.
fn classes_cubiques(m: i64) -> BigInt {
    if m == 1 {
        return BigInt::one();
    }

    let mut resultat = BigInt::one();
    for (p, k) in factorise(m) {
        let pb = BigInt::from(p);

        let base: BigInt = if p == 2 {
            if k == 1 {
                BigInt::from(8)
            } else {
                BigInt::from(8) * BigInt::from(4).pow(k - 1)
            }
        } else if p == 3 {
            if k == 1 {
                BigInt::from(24)
            } else {
                BigInt::from(24) * BigInt::from(9).pow(k - 1)
            }
        } else {
            let selon_p = match p % 9 {
                1 | 8 => (&pb - 1) * (&pb + 1) * &pb,
                2 | 5 => (&pb + 1) * &pb * &pb,
                4 | 7 => (&pb - 1) * &pb * &pb,
                _ => &pb * &pb * &pb,
            };
            // pour p^k : multiplier par p^(2(k-1))
            selon_p * pb.pow(2 * (k - 1))
        };

        resultat *= base;
    }
    resultat
}
