// src/angles.rs
//
// Conversions d'angles :
// - littéral DMS (D°M'S") -> valeur décimale dans le mode courant
// - littéraux suffixés Nr (radians) et Ng (grades) -> mode courant
// - facteurs d'enrobage trig (argument vers radians, résultat depuis radians)
// - sortie ►DMS : décimal -> D°M'S" signé, avec retenues 60" -> 1' -> 1°

use std::f64::consts::PI;

use crate::modes::ModeAngle;

/// D°M'S" -> valeur décimale exprimée dans `mode`.
/// Le littéral est toujours lu comme des degrés sexagésimaux.
pub fn dms_vers_decimal(d: f64, m: f64, s: f64, mode: ModeAngle) -> f64 {
    let degres = d + m / 60.0 + s / 3600.0;
    match mode {
        ModeAngle::Rad => degres * PI / 180.0,
        ModeAngle::Grd => degres * 400.0 / 360.0,
        ModeAngle::Deg => degres,
    }
}

/// Littéral `Nr` (radians) -> valeur dans `mode`.
pub fn rad_vers_mode(v: f64, mode: ModeAngle) -> f64 {
    match mode {
        ModeAngle::Deg => v * 180.0 / PI,
        ModeAngle::Grd => v * 200.0 / PI,
        ModeAngle::Rad => v,
    }
}

/// Littéral `Ng` (grades) -> valeur dans `mode`.
pub fn grad_vers_mode(v: f64, mode: ModeAngle) -> f64 {
    match mode {
        ModeAngle::Rad => v * PI / 200.0,
        ModeAngle::Deg => v * 9.0 / 10.0, // 100 grades = 90°
        ModeAngle::Grd => v,
    }
}

/// Facteur multiplicatif : argument trig (dans `mode`) -> radians.
pub fn facteur_vers_radians(mode: ModeAngle) -> f64 {
    match mode {
        ModeAngle::Rad => 1.0,
        ModeAngle::Deg => PI / 180.0,
        ModeAngle::Grd => PI / 200.0,
    }
}

/// Facteur multiplicatif : résultat trig inverse (radians) -> `mode`.
pub fn facteur_depuis_radians(mode: ModeAngle) -> f64 {
    match mode {
        ModeAngle::Rad => 1.0,
        ModeAngle::Deg => 180.0 / PI,
        ModeAngle::Grd => 200.0 / PI,
    }
}

/// Sortie ►DMS : `valeur` (interprétée dans `mode`) -> chaîne D°M'S" signée.
/// Les secondes sont arrondies ; 60" et 60' remontent d'un cran.
pub fn decimal_vers_dms(valeur: f64, mode: ModeAngle) -> String {
    // D'abord tout ramener en degrés décimaux.
    let mut degres_dec = match mode {
        ModeAngle::Rad => valeur * 180.0 / PI,
        ModeAngle::Grd => valeur * 360.0 / 400.0,
        ModeAngle::Deg => valeur,
    };

    let negatif = degres_dec < 0.0;
    if negatif {
        degres_dec = -degres_dec;
    }

    let mut degres = degres_dec.trunc() as i64;
    let minutes_dec = (degres_dec - degres as f64) * 60.0;
    let mut minutes = minutes_dec.trunc() as i64;
    let mut secondes = ((minutes_dec - minutes as f64) * 60.0).round() as i64;

    if secondes == 60 {
        secondes = 0;
        minutes += 1;
    }
    if minutes == 60 {
        minutes = 0;
        degres += 1;
    }

    if negatif {
        format!("-{degres}°{minutes}'{secondes}\"")
    } else {
        format!("{degres}°{minutes}'{secondes}\"")
    }
}
