// src/format.rs
//
// Rendu du résultat numérique.
// - nettoyage du bruit flottant (±1e-10 -> 0 / entier le plus proche)
// - notation libre (flo), scientifique (sci = Mx10^E, M ∈ [1,10)),
//   ingénieur (eng = exposant multiple de 3, M ∈ [1,1000))
// - FIX n : nombre de décimales imposé
// - fractions : meilleure approximation rationnelle à dénominateur borné
//   (fraction continue + semiconvergente), rendue mixte W┘N/D ou impropre N/D

use num_rational::Rational64;
use num_traits::ToPrimitive;

use crate::modes::FormatSortie;

/// Seuil du nettoyage flottant. Heuristique d'AFFICHAGE assumée (elle écrase
/// les résultats légitimes plus petits), pas une garantie numérique.
const EPSILON_NETTOYAGE: f64 = 1e-10;

/// Dénominateur maximal des fractions affichées.
const DENOMINATEUR_MAX: i64 = 1000;

/// Nettoie le bruit flottant : quasi-zéro -> 0, quasi-entier -> entier.
pub fn nettoyer(x: f64) -> f64 {
    if x.abs() < EPSILON_NETTOYAGE {
        return 0.0;
    }
    if (x - x.round()).abs() < EPSILON_NETTOYAGE {
        return x.round();
    }
    x
}

/* ------------------------ %g maison ------------------------ */

/// Équivalent de printf %.{precision}g : `precision` chiffres significatifs,
/// zéros de queue retirés, bascule en notation exponentielle quand l'exposant
/// sort de [-4, precision).
pub fn format_g(x: f64, precision: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }

    let exp = x.abs().log10().floor() as i32;

    if exp < -4 || exp >= precision as i32 {
        let mantisse = x / 10f64.powi(exp);
        let m = coupe_zeros(&format!("{:.*}", precision.saturating_sub(1), mantisse));
        let signe = if exp < 0 { '-' } else { '+' };
        format!("{m}e{signe}{:02}", exp.abs())
    } else {
        let decimales = (precision as i32 - 1 - exp).max(0) as usize;
        coupe_zeros(&format!("{x:.decimales$}"))
    }
}

fn coupe_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/* ------------------------ Notations flo / sci / eng ------------------------ */

/// Rend `valeur` (déjà nettoyée) selon le format et les décimales imposées.
pub fn formater(valeur: f64, format: FormatSortie, decimales: Option<usize>) -> String {
    match decimales {
        None => formater_libre(valeur, format),
        Some(dp) => formater_fixe(valeur, format, dp),
    }
}

fn formater_libre(valeur: f64, format: FormatSortie) -> String {
    match format {
        FormatSortie::Flo => {
            if valeur.fract() == 0.0 {
                // entier : décimal simple, bascule Mx10^E au-delà de 10 chiffres
                let chiffres = format!("{:.0}", valeur.abs());
                if chiffres.len() > 10 {
                    mantisse_exposant(valeur, exposant10(valeur))
                } else {
                    format!("{valeur:.0}")
                }
            } else {
                // 10 chiffres significatifs ; Mx10^E si la partie entière
                // dépasse à elle seule 10 chiffres
                if valeur.abs() >= 1e10 {
                    mantisse_exposant(valeur, exposant10(valeur))
                } else {
                    format_g(valeur, 10)
                }
            }
        }

        FormatSortie::Sci => {
            if valeur == 0.0 {
                return "0x10^0".to_string();
            }
            mantisse_exposant(valeur, exposant10(valeur))
        }

        FormatSortie::Eng => {
            if valeur == 0.0 {
                return "0x10^0".to_string();
            }
            let e = exposant10(valeur).div_euclid(3) * 3;
            mantisse_exposant(valeur, e)
        }
    }
}

fn formater_fixe(valeur: f64, format: FormatSortie, dp: usize) -> String {
    match format {
        FormatSortie::Flo => format!("{valeur:.dp$}"),

        FormatSortie::Sci => {
            if valeur == 0.0 {
                return format!("{:.dp$}x10^0", 0.0);
            }
            let e = exposant10(valeur);
            let m = valeur / 10f64.powi(e);
            format!("{m:.dp$}x10^{e}")
        }

        FormatSortie::Eng => {
            if valeur == 0.0 {
                return format!("{:.dp$}x10^0", 0.0);
            }
            let e = exposant10(valeur).div_euclid(3) * 3;
            let m = valeur / 10f64.powi(e);
            format!("{m:.dp$}x10^{e}")
        }
    }
}

fn exposant10(valeur: f64) -> i32 {
    valeur.abs().log10().floor() as i32
}

/// Mx10^E : mantisse entière nue, sinon 6 chiffres significatifs.
fn mantisse_exposant(valeur: f64, e: i32) -> String {
    let m = valeur / 10f64.powi(e);
    if m.fract() == 0.0 {
        format!("{m:.0}x10^{e}")
    } else {
        format!("{}x10^{e}", format_g(m, 6))
    }
}

/* ------------------------ Fractions bornées ------------------------ */

/// Meilleure approximation rationnelle de `x` avec dénominateur ≤ `max_den`.
/// Fraction continue classique ; à l'arrêt, départage convergente /
/// semiconvergente (égalité -> convergente).
pub fn approx_rationnelle(x: f64, max_den: i64) -> Rational64 {
    let (mut p0, mut q0, mut p1, mut q1): (i64, i64, i64, i64) = (0, 1, 1, 0);
    let mut reste = x;

    // Garde-fou : la fraction continue d'un f64 converge bien avant 64 étapes.
    for _ in 0..64 {
        let a = reste.floor();
        if !a.is_finite() || a.abs() >= (i64::MAX / 4) as f64 {
            break;
        }
        let a = a as i64;

        let p2 = match a.checked_mul(p1).and_then(|v| v.checked_add(p0)) {
            Some(v) => v,
            None => break,
        };
        let q2 = match a.checked_mul(q1).and_then(|v| v.checked_add(q0)) {
            Some(v) => v,
            None => break,
        };
        if q2 > max_den {
            break;
        }

        (p0, q0, p1, q1) = (p1, q1, p2, q2);

        let frac = reste - reste.floor();
        if frac.abs() < 1e-12 {
            return Rational64::new(p1, q1);
        }
        reste = 1.0 / frac;
    }

    if q1 == 0 {
        // jamais avancé (x démesuré) : on tronque
        return Rational64::new(x as i64, 1);
    }

    let k = (max_den - q0) / q1.max(1);
    let semi = Rational64::new(p0 + k * p1, q0 + k * q1);
    let conv = Rational64::new(p1, q1);

    let d_semi = (semi.to_f64().unwrap_or(f64::MAX) - x).abs();
    let d_conv = (conv.to_f64().unwrap_or(f64::MAX) - x).abs();
    if d_semi < d_conv {
        semi
    } else {
        conv
    }
}

/// Décimal -> fraction mixte : entier nu si entier, sinon W┘N/D (ou ±N/D
/// sans partie entière).
pub fn decimal_vers_fraction_mixte(x: f64) -> String {
    if x.fract() == 0.0 {
        return format!("{x:.0}");
    }

    let entier = x.trunc();
    let frac = approx_rationnelle((x - entier).abs(), DENOMINATEUR_MAX);

    if entier == 0.0 {
        let signe = if x < 0.0 { "-" } else { "" };
        format!("{signe}{}/{}", frac.numer(), frac.denom())
    } else {
        format!("{entier:.0}┘{}/{}", frac.numer(), frac.denom())
    }
}

/// Décimal -> fraction impropre : N/1 si entier, sinon ±N/D.
pub fn decimal_vers_fraction_impropre(x: f64) -> String {
    if x.fract() == 0.0 {
        return format!("{x:.0}/1");
    }
    let frac = approx_rationnelle(x.abs(), DENOMINATEUR_MAX);
    let signe = if x < 0.0 { "-" } else { "" };
    format!("{signe}{}/{}", frac.numer(), frac.denom())
}
