// src/directives.rs
//
// Directives de ligne (préfixe ► et compagnie), traitées AVANT la
// tokenisation. L'ordre des étapes est contractuel : les passes suivantes
// supposent la normalisation des précédentes.
//
// 1. suffixe mémoire ►a..►e / ►r (retiré, cible mémorisée)
// 2. directives de conversion ►f↔d et ►A B/C↔D/E + détection de la
//    notation fraction (mixte ┘ ou p/q nu) — détectée AVANT normalisation ÷
// 3. ÷ -> /  puis substitution du jeton Ans
// 4. ►DMS (retiré, drapeau mémorisé)
// 5. (les fractions mixtes W┘N/D sont lues par le tokenizer)
// 6. retrait des jetons de conversion déjà traités
//
// Tout est balayé à la main, index par index (pas de regex).

use crate::erreurs::ErreurEval;
use crate::modes::Registre;

/// Ce que la ligne demandait en plus de l'expression elle-même.
#[derive(Clone, Debug, Default)]
pub struct Directives {
    /// Cible du suffixe ►lettre, à rendre à l'appelant.
    pub memoire: Option<Registre>,
    /// ►f↔d présent.
    pub conv_fraction: bool,
    /// ►A B/C↔D/E présent.
    pub conv_format_fraction: bool,
    /// ►DMS présent.
    pub vers_dms: bool,
    /// L'entrée contient la notation mixte ┘.
    pub fraction_mixte: bool,
    /// L'entrée contient un motif p/q nu (hors notation mixte).
    pub fraction_simple: bool,
}

/// Analyse les directives et rend l'expression nettoyée, prête à tokeniser.
pub fn analyser(texte: &str, ans: &str) -> (String, Directives) {
    let mut d = Directives::default();
    let mut expr = texte.to_string();

    // 1. suffixe mémoire en toute fin de ligne
    let cs: Vec<char> = expr.chars().collect();
    if cs.len() >= 2 && cs[cs.len() - 2] == '►' {
        if let Some(reg) = Registre::depuis_lettre(cs[cs.len() - 1]) {
            d.memoire = Some(reg);
            expr = cs[..cs.len() - 2].iter().collect();
        }
    }

    // 2. conversions + détection fraction (sur le texte encore brut)
    d.conv_fraction = expr.contains("►f↔d");
    d.conv_format_fraction = expr.contains("►A B/C↔D/E");
    d.fraction_mixte = expr.contains('┘');
    d.fraction_simple = contient_fraction_simple(&expr.replace('┘', ""));

    // 3. normalisation ÷ puis Ans
    expr = expr.replace('÷', "/");
    expr = expr.replace("Ans", ans);

    // 4. ►DMS
    d.vers_dms = expr.contains("►DMS");
    if d.vers_dms {
        expr = expr.replace("►DMS", "");
    }

    // 6. jetons de conversion (déjà notés en 2)
    expr = expr.replace("►f↔d", "").replace("►A B/C↔D/E", "");

    (expr, d)
}

/// Garde textuelle de sûreté : l'évaluateur est un bac à sable numérique
/// fermé, mais ces sous-chaînes restent refusées d'office (catégorie
/// d'erreur dédiée, jamais d'évaluation partielle).
pub fn verifier_surete(texte: &str) -> Result<(), ErreurEval> {
    for interdit in ["import", "exec", "eval", "__"] {
        if texte.contains(interdit) {
            return Err(ErreurEval::Surete(format!("jeton refusé « {interdit} »")));
        }
    }
    Ok(())
}

/// Motif p/q nu : soit la chaîne entière est `\d+/\d+`, soit un `\d+/\d+`
/// suit un caractère qui n'est ni chiffre ni '/'.
fn contient_fraction_simple(s: &str) -> bool {
    let cs: Vec<char> = s.chars().collect();

    // chaîne entière
    if let Some(fin) = lit_p_sur_q(&cs, 0) {
        if fin == cs.len() {
            return true;
        }
    }

    for i in 0..cs.len() {
        if !cs[i].is_ascii_digit() && cs[i] != '/' && lit_p_sur_q(&cs, i + 1).is_some() {
            return true;
        }
    }
    false
}

/// Lit `\d+/\d+` à partir de `debut` ; rend l'index de fin si ça matche.
fn lit_p_sur_q(cs: &[char], debut: usize) -> Option<usize> {
    let mut i = debut;
    let d0 = i;
    while i < cs.len() && cs[i].is_ascii_digit() {
        i += 1;
    }
    if i == d0 || i >= cs.len() || cs[i] != '/' {
        return None;
    }
    i += 1;
    let d1 = i;
    while i < cs.len() && cs[i].is_ascii_digit() {
        i += 1;
    }
    if i == d1 {
        return None;
    }
    Some(i)
}
