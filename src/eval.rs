// src/eval.rs
//
// Pipeline complet d'une évaluation ("=") :
//
// directives ► -> garde de sûreté -> jetons -> équilibrage parenthèses
//            -> RPN -> Expr -> évaluation (mode d'angle / hyp / graine)
//            -> nettoyage flottant -> rendu (fraction / DMS / flo-sci-eng)
//
// Contrat appelant : evaluer_expression ne panique JAMAIS et ne retourne
// jamais d'erreur : toute faute devient un affichage "Error: …" avec cible
// mémoire et valeur brute à None.

use tracing::debug;

use crate::angles::decimal_vers_dms;
use crate::directives::{analyser, verifier_surete};
use crate::erreurs::ErreurEval;
use crate::expr::Contexte;
use crate::format::{
    decimal_vers_fraction_impropre, decimal_vers_fraction_mixte, formater, nettoyer,
};
use crate::jetons::{equilibrer, format_jetons, tokenize};
use crate::modes::{Options, Registre};
use crate::rpn::{from_rpn, to_rpn};

/// Résultat d'UNE évaluation, consommé tel quel par l'appelant.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultatEval {
    /// Texte à afficher (ou "Error: …").
    pub affichage: String,
    /// Cible du suffixe ►lettre, le cas échéant.
    pub memoire: Option<Registre>,
    /// Valeur numérique avant formatage (None si erreur).
    pub valeur: Option<f64>,
}

/// API publique : évalue une ligne de notation calculatrice.
pub fn evaluer_expression(texte: &str, options: &Options) -> ResultatEval {
    match pipeline(texte, options) {
        Ok(r) => r,
        Err(e) => ResultatEval {
            affichage: format!("Error: {e}"),
            memoire: None,
            valeur: None,
        },
    }
}

fn pipeline(texte: &str, options: &Options) -> Result<ResultatEval, ErreurEval> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe("entrée vide"));
    }

    // 1) directives de ligne (► mémoire, conversions, Ans, ÷)
    let (expr_txt, dir) = analyser(s, &options.ans);

    // 2) garde textuelle (catégorie d'erreur dédiée, jamais évalué)
    verifier_surete(&expr_txt)?;

    // 3) jetons + équilibrage
    let jetons = equilibrer(tokenize(&expr_txt)?);
    debug!(jetons = %format_jetons(&jetons), "expression tokenisée");

    // 4) RPN -> AST
    let arbre = from_rpn(&to_rpn(&jetons)?)?;
    debug!(arbre = %arbre, "AST construit");

    // 5) évaluation numérique
    let ctx = Contexte {
        mode: options.mode,
        hyp: options.hyp,
        graine: options.graine,
    };
    let brut = arbre.evaluer(&ctx)?;
    if !brut.is_finite() {
        return Err(ErreurEval::domaine("résultat non fini"));
    }

    // 6) nettoyage du bruit flottant (heuristique d'affichage)
    let brut = nettoyer(brut);
    debug!(brut, "valeur calculée");

    // 7) rendu : les directives fraction court-circuitent le formatage
    //    numérique ; ►DMS court-circuite ensuite ; sinon flo/sci/eng.
    let affichage = match (
        dir.conv_format_fraction,
        dir.conv_fraction,
        dir.fraction_mixte,
        dir.fraction_simple,
    ) {
        // ►A B/C↔D/E : entrée mixte -> impropre
        (true, _, true, _) => decimal_vers_fraction_impropre(brut),
        // ►A B/C↔D/E : entrée p/q nue ou décimale -> mixte
        (true, _, false, _) => decimal_vers_fraction_mixte(brut),
        // ►f↔d sans notation mixte : décimal -> mixte
        (false, true, false, _) => decimal_vers_fraction_mixte(brut),
        // notation mixte sans ►f↔d : le résultat reste rendu en mixte
        (false, false, true, _) => decimal_vers_fraction_mixte(brut),
        // ►f↔d SUR notation mixte (= vers le décimal), et cas général
        _ => {
            if dir.vers_dms {
                decimal_vers_dms(brut, options.mode)
            } else {
                formater(brut, options.format, options.decimales)
            }
        }
    };

    Ok(ResultatEval {
        affichage,
        memoire: dir.memoire,
        valeur: Some(brut),
    })
}
