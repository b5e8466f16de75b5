// src/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) : doit être une fonction connue (pas de variables dans ce
//   langage) ; `rand` seul (sans parenthèse) devient un appel à zéro argument
// - Moins unaire : si '-' arrive quand on n'attend PAS une valeur, on
//   injecte 0 : "-x" => "0 x -"
// - '!' postfixe : sort immédiatement après sa valeur
// - nPr / nCr : infixes, lient plus fort que ^ (comme sur la machine)
// - X√ : opérateur binaire n X√ (arg) => arg^(1/n), lie plus fort que tout
// - Virgules : séparateurs d'arguments ; l'arité effective de chaque appel
//   est comptée pendant la conversion
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sortent à la parenthèse fermante, avec leur arité.

use crate::erreurs::ErreurEval;
use crate::expr::{fonction_depuis_nom, Expr, Fonction};
use crate::jetons::Tok;

/// Élément de notation polonaise inversée.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    /// Feuille (Num / Pi / Euler / Dms / LitRad / LitGrad).
    Valeur(Tok),
    /// Opérateur (binaire, ou '!' postfixe).
    Op(Tok),
    /// Appel de fonction nommée + arité effective.
    Appel(String, usize),
}

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        Tok::NPr | Tok::NCr => 4,
        Tok::RootN => 5,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::RootN)
}

fn est_valeur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Pi | Tok::Euler | Tok::Dms(..) | Tok::LitRad(_) | Tok::LitGrad(_)
    )
}

/// Convertit une suite de jetons (parenthèses déjà équilibrées) en RPN.
pub fn to_rpn(jetons: &[Tok]) -> Result<Vec<Rpn>, ErreurEval> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // true = parenthèse d'appel de fonction (une arité est ouverte).
    let mut pile_paren: Vec<bool> = Vec::new();
    let mut arites: Vec<usize> = Vec::new();

    // "valeur" = un atome ou une expression fermée (détecte le moins unaire).
    let mut prev_was_value = false;

    let mut i = 0;
    while i < jetons.len() {
        let tok = jetons[i].clone();

        match tok {
            t if est_valeur(&t) => {
                out.push(Rpn::Valeur(t));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if fonction_depuis_nom(&name).is_none() {
                    return Err(ErreurEval::syntaxe(format!("identifiant inconnu : {name}")));
                }
                let suit_lpar = matches!(jetons.get(i + 1), Some(Tok::LPar));
                if suit_lpar {
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else if name == "rand" {
                    // rand nu : appel à zéro argument
                    out.push(Rpn::Appel(name, 0));
                    prev_was_value = true;
                } else {
                    return Err(ErreurEval::syntaxe(format!(
                        "fonction {name} sans parenthèse"
                    )));
                }
            }

            Tok::LPar => {
                let paren_de_fn = matches!(ops.last(), Some(Tok::Ident(_)));
                if paren_de_fn {
                    // arité 0 si ')' suit immédiatement, sinon au moins 1
                    let vide = matches!(jetons.get(i + 1), Some(Tok::RPar));
                    arites.push(usize::from(!vide));
                }
                pile_paren.push(paren_de_fn);
                ops.push(Tok::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(op) => out.push(Rpn::Op(op)),
                        None => {
                            return Err(ErreurEval::syntaxe("parenthèse fermante inattendue"))
                        }
                    }
                }

                if pile_paren.pop().unwrap_or(false) {
                    // la fonction est forcément juste dessous
                    match ops.pop() {
                        Some(Tok::Ident(name)) => {
                            let n = arites.pop().unwrap_or(0);
                            out.push(Rpn::Appel(name, n));
                        }
                        _ => return Err(ErreurEval::syntaxe("appel de fonction mal formé")),
                    }
                }

                prev_was_value = true;
            }

            Tok::Comma => {
                // vide les opérateurs de l'argument courant
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    let op = ops.pop().unwrap_or(Tok::Comma);
                    out.push(Rpn::Op(op));
                }
                match (pile_paren.last().copied(), arites.last_mut()) {
                    (Some(true), Some(n)) => *n += 1,
                    _ => return Err(ErreurEval::syntaxe("virgule inattendue")),
                }
                prev_was_value = false;
            }

            Tok::Bang => {
                // postfixe : s'applique à la valeur qui vient de sortir
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("'!' sans opérande"));
                }
                out.push(Rpn::Op(Tok::Bang));
                // prev_was_value reste vrai
            }

            Tok::Minus => {
                // moins unaire : si pas de valeur avant, injecte 0
                if !prev_was_value {
                    out.push(Rpn::Valeur(Tok::Num(0.0)));
                }
                depile_selon_precedence(&mut ops, &mut out, &Tok::Minus);
                ops.push(Tok::Minus);
                prev_was_value = false;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret | Tok::NPr | Tok::NCr
            | Tok::RootN => {
                depile_selon_precedence(&mut ops, &mut out, &tok);
                ops.push(tok);
                prev_was_value = false;
            }

            _ => return Err(ErreurEval::syntaxe("jeton inattendu")),
        }

        i += 1;
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Tok::LPar => return Err(ErreurEval::syntaxe("parenthèses non fermées")),
            Tok::Ident(name) => {
                return Err(ErreurEval::syntaxe(format!(
                    "fonction {name} sans argument"
                )))
            }
            other => out.push(Rpn::Op(other)),
        }
    }

    Ok(out)
}

/// Dépile tant que :
/// - on n'est pas bloqué par '('
/// - on ne traverse pas une fonction (elle reste collée à son argument)
/// - la précédence/associativité exige de sortir l'opérateur du haut
fn depile_selon_precedence(ops: &mut Vec<Tok>, out: &mut Vec<Rpn>, tok: &Tok) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar | Tok::Ident(_)) {
            break;
        }

        let p_top = precedence(top);
        let p_tok = precedence(tok);

        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if doit_pop {
            let op = ops.pop().unwrap_or(Tok::Plus);
            out.push(Rpn::Op(op));
        } else {
            break;
        }
    }
}

/// Construit une Expr à partir d'une RPN.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurEval> {
    let invalide = || ErreurEval::syntaxe("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for elem in rpn.iter().cloned() {
        match elem {
            Rpn::Valeur(tok) => st.push(match tok {
                Tok::Num(v) => Expr::Nombre(v),
                Tok::Pi => Expr::Pi,
                Tok::Euler => Expr::Euler,
                Tok::Dms(d, m, s) => Expr::Appel(
                    Fonction::Dms,
                    vec![Expr::Nombre(d), Expr::Nombre(m), Expr::Nombre(s)],
                ),
                Tok::LitRad(v) => Expr::Appel(Fonction::DepuisRad, vec![Expr::Nombre(v)]),
                Tok::LitGrad(v) => Expr::Appel(Fonction::DepuisGrad, vec![Expr::Nombre(v)]),
                _ => return Err(invalide()),
            }),

            Rpn::Op(Tok::Bang) => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Appel(Fonction::Factorielle, vec![x]));
            }

            Rpn::Op(tok) => {
                let b = st.pop().ok_or_else(invalide)?;
                let a = st.pop().ok_or_else(invalide)?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    // n X√ (arg) => arg^(1/n)
                    Tok::RootN => Expr::Pow(
                        Box::new(b),
                        Box::new(Expr::Div(Box::new(Expr::Nombre(1.0)), Box::new(a))),
                    ),
                    Tok::NPr => Expr::Appel(Fonction::Arrangement, vec![a, b]),
                    Tok::NCr => Expr::Appel(Fonction::Combinaison, vec![a, b]),
                    _ => return Err(invalide()),
                };

                st.push(e);
            }

            Rpn::Appel(name, n) => {
                let f = fonction_depuis_nom(&name)
                    .ok_or_else(|| ErreurEval::syntaxe(format!("identifiant inconnu : {name}")))?;
                if !f.arite_acceptee(n) {
                    return Err(ErreurEval::syntaxe(format!(
                        "{name} : mauvais nombre d'arguments ({n})"
                    )));
                }
                let mut args = Vec::with_capacity(n);
                for _ in 0..n {
                    args.push(st.pop().ok_or_else(invalide)?);
                }
                args.reverse();
                st.push(Expr::Appel(f, args));
            }
        }
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().ok_or_else(invalide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jetons::{equilibrer, tokenize};

    fn parse(s: &str) -> Result<Expr, ErreurEval> {
        let jetons = equilibrer(tokenize(s)?);
        from_rpn(&to_rpn(&jetons)?)
    }

    #[test]
    fn priorites() {
        // 2+3*4 : le * d'abord
        let e = parse("2+3*4").unwrap();
        assert!(matches!(e, Expr::Add(_, _)));

        // ^ associatif à droite : 2^3^2 = 2^(3^2)
        let e = parse("2^3^2").unwrap();
        if let Expr::Pow(_, droite) = e {
            assert!(matches!(*droite, Expr::Pow(_, _)));
        } else {
            panic!("attendu Pow");
        }
    }

    #[test]
    fn moins_unaire() {
        // -x => 0 x -
        let e = parse("-5").unwrap();
        assert!(matches!(e, Expr::Sub(_, _)));
    }

    #[test]
    fn appels_fonctions() {
        let e = parse("sin(0)").unwrap();
        assert!(matches!(e, Expr::Appel(Fonction::Sin, _)));

        let e = parse("rpr(3,4)").unwrap();
        if let Expr::Appel(Fonction::RectPolR, args) = e {
            assert_eq!(args.len(), 2);
        } else {
            panic!("attendu RectPolR");
        }

        // rand nu et rand()
        assert!(matches!(
            parse("rand").unwrap(),
            Expr::Appel(Fonction::Alea, _)
        ));
        assert!(matches!(
            parse("rand()").unwrap(),
            Expr::Appel(Fonction::Alea, _)
        ));
    }

    #[test]
    fn arites_refusees() {
        assert!(parse("sin(1,2)").is_err());
        assert!(parse("rpr(1)").is_err());
        assert!(parse("sin").is_err());
    }

    #[test]
    fn identifiant_inconnu() {
        assert!(parse("foo(1)").is_err());
        assert!(parse("x+1").is_err());
    }

    #[test]
    fn racine_n_ieme_construit_pow() {
        let e = parse("3X√(8)").unwrap();
        assert!(matches!(e, Expr::Pow(_, _)));
    }

    #[test]
    fn npr_lie_plus_fort_que_puissance() {
        // 2^3nPr2 = 2^(3 nPr 2)
        let e = parse("2^3nPr2").unwrap();
        if let Expr::Pow(_, droite) = e {
            assert!(matches!(*droite, Expr::Appel(Fonction::Arrangement, _)));
        } else {
            panic!("attendu Pow");
        }
    }
}
