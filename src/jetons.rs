// src/jetons.rs
//
// Tokenisation de la notation calculatrice.
// Supporte :
// - nombres (ex: 12, 3.5), pourcentage littéral (ex: 25% -> 0.25)
// - fractions mixtes W┘N/D (le signe vient du moins unaire en amont)
// - littéraux DMS D°M'S", suffixes Nr (radians) et Ng (grades)
// - opérateurs + - * / ^ (** accepté comme ^), ! postfixe, nPr / nCr infixes
// - parenthèses ( ), virgule d'arguments, marqueur de négation (-)
// - π (ou pi), e seul = constante d'Euler, √ / X√ (racine, racine n-ième)
// - formes de conversion R►Pr( R►Pθ( P►Rx( P►Ry(
// - trig inverse écrite sin^(-1)( / sin**(-1)( (espaces tolérés)
// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)

use crate::erreurs::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    Euler,

    /// Littéral D°M'S" (composantes entières, gardées en f64 pour l'AST).
    Dms(f64, f64, f64),
    /// Littéral Nr : N est en radians, à ramener au mode courant.
    LitRad(f64),
    /// Littéral Ng : N est en grades, à ramener au mode courant.
    LitGrad(f64),

    // Fonctions (sin/cos/…, rpr/rptheta/prx/pry) et inconnues à rejeter plus tard.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **
    Bang,  // ! postfixe (factorielle)
    RootN, // X√ précédé d'un nombre : racine n-ième (opérateur binaire)
    NPr,
    NCr,

    Comma,
    LPar,
    RPar,
}

/// Tokenize une chaîne (déjà débarrassée des directives ►) en jetons.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<Tok> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Marqueur de négation (-) : exactement trois caractères.
        if c == '(' && i + 2 < chars.len() && chars[i + 1] == '-' && chars[i + 2] == ')' {
            out.push(Tok::Minus);
            i += 3;
            continue;
        }

        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }
        if c == ',' {
            out.push(Tok::Comma);
            i += 1;
            continue;
        }

        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // ** = puissance (forme alternative de ^)
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            '!' => {
                out.push(Tok::Bang);
                i += 1;
                continue;
            }
            _ => {}
        }

        if c == 'π' {
            out.push(Tok::Pi);
            i += 1;
            continue;
        }

        // √ seul : racine carrée.
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // X√ : racine n-ième si un nombre précède, sinon racine carrée.
        if c == 'X' && i + 1 < chars.len() && chars[i + 1] == '√' {
            if matches!(out.last(), Some(Tok::Num(_))) {
                out.push(Tok::RootN);
            } else {
                out.push(Tok::Ident("sqrt".to_string()));
            }
            i += 2;
            continue;
        }

        // Formes de conversion de coordonnées (avant la lecture d'identifiant).
        if c == 'R' || c == 'P' {
            if let Some((nom, saut)) = forme_coordonnee(&chars, i) {
                out.push(Tok::Ident(nom.to_string()));
                i += saut;
                continue;
            }
        }

        // nPr / nCr : opérateurs infixes, casse exacte — AVANT la lecture
        // d'identifiant (l'opérande droit peut coller : 5nPr2).
        if c == 'n' && i + 2 < chars.len() && chars[i + 2] == 'r' {
            if chars[i + 1] == 'P' {
                out.push(Tok::NPr);
                i += 3;
                continue;
            }
            if chars[i + 1] == 'C' {
                out.push(Tok::NCr);
                i += 3;
                continue;
            }
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let debut = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[debut..i].iter().collect();

            let w = mot.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
                continue;
            }
            // e seul = constante d'Euler (jamais au milieu d'un identifiant).
            if w == "e" {
                out.push(Tok::Euler);
                continue;
            }

            // sin^(-1)( etc. -> asin( (le '(' final reste à lire).
            if matches!(w.as_str(), "sin" | "cos" | "tan") {
                if let Some(saut) = suffixe_inverse(&chars, i) {
                    out.push(Tok::Ident(format!("a{w}")));
                    i += saut;
                    continue;
                }
            }

            out.push(Tok::Ident(w));
            continue;
        }

        // Nombre : \d+(\.\d+)? puis suffixes éventuels (° % r g ┘).
        if c.is_ascii_digit() {
            let (val, fin) = lit_nombre(&chars, i)?;
            i = fin;

            // D°M'S"
            if i < chars.len() && chars[i] == '°' {
                let (m, s, fin) = lit_suite_dms(&chars, i + 1)?;
                out.push(Tok::Dms(val, m, s));
                i = fin;
                continue;
            }

            // N% -> N/100
            if i < chars.len() && chars[i] == '%' {
                out.push(Tok::Num(val / 100.0));
                i += 1;
                continue;
            }

            // Suffixes r / g : seulement si la lettre est terminale.
            if i < chars.len() && (chars[i] == 'r' || chars[i] == 'g') {
                let terminale = i + 1 >= chars.len()
                    || !(chars[i + 1].is_ascii_alphanumeric() || chars[i + 1] == '_');
                if terminale {
                    if chars[i] == 'r' {
                        out.push(Tok::LitRad(val));
                    } else {
                        out.push(Tok::LitGrad(val));
                    }
                    i += 1;
                    continue;
                }
            }

            // W┘N/D : fraction mixte lue comme un littéral unique.
            if i < chars.len() && chars[i] == '┘' {
                let (num, den, fin) = lit_fraction(&chars, i + 1)?;
                if den == 0.0 {
                    return Err(ErreurEval::domaine("division par zéro"));
                }
                out.push(Tok::Num(val + num / den));
                i = fin;
                continue;
            }

            out.push(Tok::Num(val));
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

/// Équilibre les parenthèses : ajoute les ')' manquantes en fin de flux.
pub fn equilibrer(mut jetons: Vec<Tok>) -> Vec<Tok> {
    let mut ouvertes: i64 = 0;
    for t in &jetons {
        match t {
            Tok::LPar => ouvertes += 1,
            Tok::RPar => ouvertes -= 1,
            _ => {}
        }
    }
    while ouvertes > 0 {
        jetons.push(Tok::RPar);
        ouvertes -= 1;
    }
    jetons
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in jetons {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::Euler => "e".to_string(),
            Tok::Dms(d, m, sec) => format!("{d}°{m}'{sec}\""),
            Tok::LitRad(v) => format!("{v}r"),
            Tok::LitGrad(v) => format!("{v}g"),
            Tok::Ident(nom) => nom.clone(),
            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::RootN => "X√".to_string(),
            Tok::NPr => "nPr".to_string(),
            Tok::NCr => "nCr".to_string(),
            Tok::Comma => ",".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

/* ------------------------ lecteurs auxiliaires ------------------------ */

/// Lit \d+(\.\d+)? à partir de `debut`. Rend (valeur, index de fin).
fn lit_nombre(cs: &[char], debut: usize) -> Result<(f64, usize), ErreurEval> {
    let mut i = debut;
    while i < cs.len() && cs[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < cs.len() && cs[i] == '.' && cs[i + 1].is_ascii_digit() {
        i += 1;
        while i < cs.len() && cs[i].is_ascii_digit() {
            i += 1;
        }
    }
    let txt: String = cs[debut..i].iter().collect();
    let v = txt
        .parse::<f64>()
        .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide : {txt}")))?;
    Ok((v, i))
}

/// Lit `M'S"` (les degrés et le ° sont déjà consommés). Composantes entières.
fn lit_suite_dms(cs: &[char], debut: usize) -> Result<(f64, f64, usize), ErreurEval> {
    let (m, fin_m) = lit_entier(cs, debut).ok_or_else(|| erreur_dms())?;
    if fin_m >= cs.len() || cs[fin_m] != '\'' {
        return Err(erreur_dms());
    }
    let (s, fin_s) = lit_entier(cs, fin_m + 1).ok_or_else(|| erreur_dms())?;
    if fin_s >= cs.len() || cs[fin_s] != '"' {
        return Err(erreur_dms());
    }
    Ok((m, s, fin_s + 1))
}

fn erreur_dms() -> ErreurEval {
    ErreurEval::syntaxe("notation DMS incomplète (attendu D°M'S\")")
}

/// Lit `N/D` (après ┘). Composantes entières.
fn lit_fraction(cs: &[char], debut: usize) -> Result<(f64, f64, usize), ErreurEval> {
    let msg = "fraction mixte incomplète (attendu W┘N/D)";
    let (n, fin_n) = lit_entier(cs, debut).ok_or_else(|| ErreurEval::syntaxe(msg))?;
    if fin_n >= cs.len() || cs[fin_n] != '/' {
        return Err(ErreurEval::syntaxe(msg));
    }
    let (d, fin_d) = lit_entier(cs, fin_n + 1).ok_or_else(|| ErreurEval::syntaxe(msg))?;
    Ok((n, d, fin_d))
}

fn lit_entier(cs: &[char], debut: usize) -> Option<(f64, usize)> {
    let mut i = debut;
    while i < cs.len() && cs[i].is_ascii_digit() {
        i += 1;
    }
    if i == debut {
        return None;
    }
    let txt: String = cs[debut..i].iter().collect();
    txt.parse::<f64>().ok().map(|v| (v, i))
}

/// R►Pr( / R►Pθ( / P►Rx( / P►Ry( à partir de `i`.
/// Rend (nom interne, nb de caractères consommés SANS le '(' final).
fn forme_coordonnee(cs: &[char], i: usize) -> Option<(&'static str, usize)> {
    const FORMES: [(&str, &str); 4] = [
        ("R►Pr(", "rpr"),
        ("R►Pθ(", "rptheta"),
        ("P►Rx(", "prx"),
        ("P►Ry(", "pry"),
    ];
    for (motif, nom) in FORMES {
        let mcs: Vec<char> = motif.chars().collect();
        if i + mcs.len() <= cs.len() && cs[i..i + mcs.len()] == mcs[..] {
            // On laisse le '(' : il fait partie de l'appel.
            return Some((nom, mcs.len() - 1));
        }
    }
    None
}

/// `^(-1)(` ou `**(-1)(` avec espaces tolérés, à partir de `i` (juste après
/// sin/cos/tan). Rend le nombre de caractères à sauter pour se retrouver SUR
/// le '(' d'appel, ou None si le motif n'y est pas.
fn suffixe_inverse(cs: &[char], i: usize) -> Option<usize> {
    let mut j = i;
    let saute_blancs = |j: &mut usize| {
        while *j < cs.len() && cs[*j].is_whitespace() {
            *j += 1;
        }
    };

    saute_blancs(&mut j);
    if j < cs.len() && cs[j] == '^' {
        j += 1;
    } else if j + 1 < cs.len() && cs[j] == '*' && cs[j + 1] == '*' {
        j += 2;
    } else {
        return None;
    }

    saute_blancs(&mut j);
    if j >= cs.len() || cs[j] != '(' {
        return None;
    }
    j += 1;
    saute_blancs(&mut j);
    if j >= cs.len() || cs[j] != '-' {
        return None;
    }
    j += 1;
    saute_blancs(&mut j);
    if j >= cs.len() || cs[j] != '1' {
        return None;
    }
    j += 1;
    saute_blancs(&mut j);
    if j >= cs.len() || cs[j] != ')' {
        return None;
    }
    j += 1;
    saute_blancs(&mut j);
    if j >= cs.len() || cs[j] != '(' {
        return None;
    }
    // On s'arrête SUR le '(' d'appel.
    Some(j - i)
}
