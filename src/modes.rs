// src/modes.rs
//
// Modes et options d'une évaluation.
// - ModeAngle : interprétation des angles (radians / degrés / grades)
// - FormatSortie : notation du résultat (flottante / scientifique / ingénieur)
// - Registre : cible mémoire du suffixe ►lettre (a..e + r = graine RNG)
// - Options : tout ce que l'UI fournit pour UN appel (aucun état global)

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModeAngle {
    #[default]
    Rad,
    Deg,
    Grd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormatSortie {
    #[default]
    Flo,
    Sci,
    Eng,
}

/// Registres mémoire de la calculatrice. `R` est la graine RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registre {
    A,
    B,
    C,
    D,
    E,
    R,
}

impl Registre {
    /// Lettre du suffixe ►lettre. Retourne None pour toute autre lettre.
    pub fn depuis_lettre(c: char) -> Option<Registre> {
        match c {
            'a' => Some(Registre::A),
            'b' => Some(Registre::B),
            'c' => Some(Registre::C),
            'd' => Some(Registre::D),
            'e' => Some(Registre::E),
            'r' => Some(Registre::R),
            _ => None,
        }
    }
}

impl fmt::Display for Registre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Registre::A => 'a',
            Registre::B => 'b',
            Registre::C => 'c',
            Registre::D => 'd',
            Registre::E => 'e',
            Registre::R => 'r',
        };
        write!(f, "{c}")
    }
}

/// Options d'un appel d'évaluation (l'appelant possède tout l'état durable).
#[derive(Clone, Debug)]
pub struct Options {
    pub mode: ModeAngle,
    pub format: FormatSortie,
    /// FIX n : nombre de décimales imposé (None = notation libre).
    pub decimales: Option<usize>,
    /// Texte substitué au jeton `Ans`.
    pub ans: String,
    /// Mode hyperbolique : sin/cos/tan deviennent sinh/cosh/tanh (sans
    /// conversion d'angle).
    pub hyp: bool,
    /// Graine RNG (registre r). None ou Some(0) = non semé.
    pub graine: Option<i64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: ModeAngle::Rad,
            format: FormatSortie::Flo,
            decimales: None,
            ans: "0".to_string(),
            hyp: false,
            graine: None,
        }
    }
}
