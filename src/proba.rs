// src/proba.rs
//
// Combinatoire + aléatoire à graine explicite.
// - factorielle : exacte en BigInt (plafond 500), rendue en f64
// - arrangement (nPr) / combinaison (nCr) : exacts puis rendus en f64
// - alea / alea_entier : StdRng semé par la graine (registre r) quand elle
//   est non nulle, sinon thread_rng
//
// Les préconditions violées produisent ErreurEval::Domaine (messages UI).

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::erreurs::ErreurEval;

/// Plafond de la factorielle (au-delà : refus, comme la calculatrice).
const FACTORIELLE_MAX: i64 = 500;

fn exige_entier_positif(x: f64, quoi: &str) -> Result<i64, ErreurEval> {
    if !x.is_finite() || x.fract() != 0.0 {
        return Err(ErreurEval::domaine(format!("{quoi} exige un entier")));
    }
    if x < 0.0 {
        return Err(ErreurEval::domaine(format!("{quoi} exige un entier ≥ 0")));
    }
    Ok(x as i64)
}

/// Produit a·(a+1)·…·b en BigInt (vide => 1).
fn produit_montant(a: i64, b: i64) -> BigInt {
    let mut acc = BigInt::one();
    let mut k = a;
    while k <= b {
        acc *= k;
        k += 1;
    }
    acc
}

fn vers_f64(v: &BigInt) -> Result<f64, ErreurEval> {
    match v.to_f64() {
        Some(x) if x.is_finite() => Ok(x),
        _ => Err(ErreurEval::domaine("résultat trop grand")),
    }
}

/// N! — entier 0..=500 seulement.
pub fn factorielle(x: f64) -> Result<f64, ErreurEval> {
    let n = exige_entier_positif(x, "la factorielle")?;
    if n > FACTORIELLE_MAX {
        return Err(ErreurEval::domaine("factorielle trop grande à calculer"));
    }
    vers_f64(&produit_montant(2, n))
}

/// a nPr b — nombre d'arrangements de r parmi n.
pub fn arrangement(n: f64, r: f64) -> Result<f64, ErreurEval> {
    let n = exige_entier_positif(n, "nPr")?;
    let r = exige_entier_positif(r, "nPr")?;
    if r > n {
        return Err(ErreurEval::domaine("nPr : r ne peut dépasser n"));
    }
    // n!/(n-r)! = (n-r+1)·…·n
    vers_f64(&produit_montant(n - r + 1, n))
}

/// a nCr b — nombre de combinaisons de r parmi n.
pub fn combinaison(n: f64, r: f64) -> Result<f64, ErreurEval> {
    let n = exige_entier_positif(n, "nCr")?;
    let r = exige_entier_positif(r, "nCr")?;
    if r > n {
        return Err(ErreurEval::domaine("nCr : r ne peut dépasser n"));
    }
    let num = produit_montant(n - r + 1, n);
    let den = produit_montant(2, r);
    vers_f64(&(num / den))
}

fn rng_depuis(graine: Option<i64>) -> StdRng {
    match graine {
        // Graine 0 = "pas de graine" (convention du registre r).
        Some(g) if g != 0 => StdRng::seed_from_u64(g as u64),
        _ => StdRng::from_entropy(),
    }
}

/// rand : uniforme dans [0, 1).
pub fn alea(graine: Option<i64>) -> f64 {
    rng_depuis(graine).gen::<f64>()
}

/// randi(min, max) : entier uniforme dans [min, max] (bornes arrondies).
pub fn alea_entier(min: f64, max: f64, graine: Option<i64>) -> Result<f64, ErreurEval> {
    let lo = min.round() as i64;
    let hi = max.round() as i64;
    if lo > hi {
        return Err(ErreurEval::domaine("randi : min > max"));
    }
    Ok(rng_depuis(graine).gen_range(lo..=hi) as f64)
}
