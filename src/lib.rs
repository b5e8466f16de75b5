//! Noyau d'une calculatrice scientifique
//!
//! Organisation interne :
//! - modes.rs       : modes (angle, format, registres) + options d'appel
//! - erreurs.rs     : taxonomie des erreurs d'évaluation
//! - directives.rs  : directives de ligne ► (mémoire, conversions, Ans)
//! - jetons.rs      : tokenisation de la notation calculatrice
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : AST f64 + évaluation (liste blanche de fonctions)
//! - format.rs      : rendu flo/sci/eng, FIX n, fractions bornées
//! - eval.rs        : pipeline complet ("=")
//! - angles.rs      : DMS, radians/grades, sortie ►DMS
//! - coordonnees.rs : conversions rectangulaire <-> polaire
//! - proba.rs       : factorielle, nPr/nCr, aléatoire semé
//! - nombres.rs     : moteur de théorie des nombres (n, m, a)
//! - stats.rs       : moteur de statistiques (1 et 2 variables)
//!
//! Le noyau ne possède AUCUN état durable : registres, graine RNG et
//! historique appartiennent à l'appelant et transitent par les options.

pub mod angles;
pub mod coordonnees;
pub mod directives;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod modes;
pub mod nombres;
pub mod proba;
pub mod rpn;
pub mod stats;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurEval;
pub use eval::{evaluer_expression, ResultatEval};
pub use modes::{FormatSortie, ModeAngle, Options, Registre};
pub use nombres::{Champ, MoteurNombres, ResultatsNombres};
pub use stats::{MoteurStats, Stats1Var, Stats2Var};
