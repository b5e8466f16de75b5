// src/erreurs.rs
//
// Taxonomie des erreurs d'évaluation.
// - Syntaxe : notation calculatrice que le réécriveur ne sait pas normaliser
// - Surete  : jetons d'évasion interdits — fatal, jamais évalué partiellement
// - Domaine : l'évaluation numérique sort du domaine (÷0, asin(2), (-1)!…)
//
// Les trois sont rattrapées au sommet du pipeline et rendues comme texte
// "Error: …" (contrat UI : jamais de panic côté appelant). Les résultats
// "non applicables" du moteur de théorie des nombres ne passent PAS par ici :
// ce sont des None, pas des erreurs.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("syntaxe : {0}")]
    Syntaxe(String),

    #[error("expression interdite : {0}")]
    Surete(String),

    #[error("domaine : {0}")]
    Domaine(String),
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurEval::Domaine(msg.into())
    }
}
