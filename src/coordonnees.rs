// src/coordonnees.rs
//
// Conversions rectangulaire <-> polaire, exposées au réécriveur via les
// formes R►Pr / R►Pθ / P►Rx / P►Ry. θ suit le mode d'angle courant.

use crate::angles::{facteur_depuis_radians, facteur_vers_radians};
use crate::modes::ModeAngle;

/// R►Pr : rayon du point (x, y).
pub fn rect_vers_pol_r(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// R►Pθ : angle du point (x, y), rendu dans `mode`.
pub fn rect_vers_pol_theta(x: f64, y: f64, mode: ModeAngle) -> f64 {
    y.atan2(x) * facteur_depuis_radians(mode)
}

/// P►Rx : abscisse du point (r, θ), θ lu dans `mode`.
pub fn pol_vers_rect_x(r: f64, theta: f64, mode: ModeAngle) -> f64 {
    r * (theta * facteur_vers_radians(mode)).cos()
}

/// P►Ry : ordonnée du point (r, θ), θ lu dans `mode`.
pub fn pol_vers_rect_y(r: f64, theta: f64, mode: ModeAngle) -> f64 {
    r * (theta * facteur_vers_radians(mode)).sin()
}
