// src/expr.rs
//
// AST numérique (f64) + évaluation.
// - Feuilles : nombre, π, e
// - Noeuds : + - * / ^, appels de fonctions d'une liste FERMÉE (Fonction)
//
// IMPORTANT (SAFE):
// - Aucune résolution de nom à l'évaluation : la liste blanche est l'enum.
// - Le mode d'angle et le drapeau hyperbolique s'appliquent AUX NOEUDS trig :
//   argument * (π/180 ou π/200) à l'aller, résultat * (180/π ou 200/π) au
//   retour pour les inverses ; en hyperbolique, substitution telle quelle
//   (aucune conversion d'angle).

use std::fmt;

use crate::angles::{
    dms_vers_decimal, facteur_depuis_radians, facteur_vers_radians, grad_vers_mode, rad_vers_mode,
};
use crate::coordonnees::{pol_vers_rect_x, pol_vers_rect_y, rect_vers_pol_r, rect_vers_pol_theta};
use crate::erreurs::ErreurEval;
use crate::modes::ModeAngle;
use crate::proba::{alea, alea_entier, arrangement, combinaison, factorielle};

/// Contexte d'évaluation d'UN appel (rien de global).
#[derive(Clone, Copy, Debug, Default)]
pub struct Contexte {
    pub mode: ModeAngle,
    pub hyp: bool,
    pub graine: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Pi,
    Euler,

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

/// Liste blanche des fonctions atteignables depuis une expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    ArcSin,
    ArcCos,
    ArcTan,
    Log10,
    Ln,
    Racine,
    Factorielle,
    Arrangement,
    Combinaison,
    Alea,
    AleaEntier,
    Dms,
    DepuisRad,
    DepuisGrad,
    RectPolR,
    RectPolTheta,
    PolRectX,
    PolRectY,
}

/// Nom de surface -> fonction. None = identifiant inconnu (refusé).
pub fn fonction_depuis_nom(nom: &str) -> Option<Fonction> {
    use Fonction::*;
    Some(match nom {
        "sin" => Sin,
        "cos" => Cos,
        "tan" => Tan,
        "asin" => ArcSin,
        "acos" => ArcCos,
        "atan" => ArcTan,
        "log" => Log10,
        "ln" => Ln,
        "sqrt" => Racine,
        "rand" => Alea,
        "randi" => AleaEntier,
        "rpr" => RectPolR,
        "rptheta" => RectPolTheta,
        "prx" => PolRectX,
        "pry" => PolRectY,
        _ => return None,
    })
}

impl Fonction {
    /// Arités admises à l'appel écrit f(...). randi accepte 0 (bornes 0..100)
    /// ou 2 ; rand accepte 0.
    pub fn arite_acceptee(&self, n: usize) -> bool {
        use Fonction::*;
        match self {
            Alea => n == 0,
            AleaEntier => n == 0 || n == 2,
            Dms => n == 3,
            Arrangement | Combinaison | RectPolR | RectPolTheta | PolRectX | PolRectY => n == 2,
            _ => n == 1,
        }
    }
}

impl Expr {
    /// Évalue l'arbre dans `ctx`. Toute sortie de domaine est une erreur
    /// (jamais de NaN/inf silencieux).
    pub fn evaluer(&self, ctx: &Contexte) -> Result<f64, ErreurEval> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),
            Pi => Ok(std::f64::consts::PI),
            Euler => Ok(std::f64::consts::E),

            Add(a, b) => Ok(a.evaluer(ctx)? + b.evaluer(ctx)?),
            Sub(a, b) => Ok(a.evaluer(ctx)? - b.evaluer(ctx)?),
            Mul(a, b) => Ok(a.evaluer(ctx)? * b.evaluer(ctx)?),

            Div(a, b) => {
                let va = a.evaluer(ctx)?;
                let vb = b.evaluer(ctx)?;
                if vb == 0.0 {
                    return Err(ErreurEval::domaine("division par zéro"));
                }
                Ok(va / vb)
            }

            Pow(a, b) => {
                let v = a.evaluer(ctx)?.powf(b.evaluer(ctx)?);
                if v.is_nan() {
                    return Err(ErreurEval::domaine("puissance hors domaine"));
                }
                Ok(v)
            }

            Appel(f, args) => evalue_appel(*f, args, ctx),
        }
    }
}

fn evalue_appel(f: Fonction, args: &[Expr], ctx: &Contexte) -> Result<f64, ErreurEval> {
    use Fonction::*;

    let mut v: Vec<f64> = Vec::with_capacity(args.len());
    for a in args {
        v.push(a.evaluer(ctx)?);
    }

    let arg = |i: usize| v.get(i).copied().unwrap_or(0.0);

    match f {
        // trig directe : hyperbolique telle quelle, sinon argument -> radians
        Sin | Cos | Tan => {
            let x = arg(0);
            if ctx.hyp {
                return Ok(match f {
                    Sin => x.sinh(),
                    Cos => x.cosh(),
                    _ => x.tanh(),
                });
            }
            let xr = x * facteur_vers_radians(ctx.mode);
            Ok(match f {
                Sin => xr.sin(),
                Cos => xr.cos(),
                _ => xr.tan(),
            })
        }

        // trig inverse : hyperbolique telle quelle, sinon résultat <- radians
        ArcSin | ArcCos | ArcTan => {
            let x = arg(0);
            if ctx.hyp {
                return match f {
                    ArcSin => Ok(x.asinh()),
                    ArcCos => {
                        if x < 1.0 {
                            Err(ErreurEval::domaine("acosh exige un argument ≥ 1"))
                        } else {
                            Ok(x.acosh())
                        }
                    }
                    _ => {
                        if x <= -1.0 || x >= 1.0 {
                            Err(ErreurEval::domaine("atanh exige |x| < 1"))
                        } else {
                            Ok(x.atanh())
                        }
                    }
                };
            }
            let rad = match f {
                ArcSin | ArcCos => {
                    if !(-1.0..=1.0).contains(&x) {
                        return Err(ErreurEval::domaine("trig inverse exige |x| ≤ 1"));
                    }
                    if matches!(f, ArcSin) {
                        x.asin()
                    } else {
                        x.acos()
                    }
                }
                _ => x.atan(),
            };
            Ok(rad * facteur_depuis_radians(ctx.mode))
        }

        Log10 | Ln => {
            let x = arg(0);
            if x <= 0.0 {
                return Err(ErreurEval::domaine("log exige un argument > 0"));
            }
            Ok(if matches!(f, Log10) { x.log10() } else { x.ln() })
        }

        Racine => {
            let x = arg(0);
            if x < 0.0 {
                return Err(ErreurEval::domaine("racine d'un nombre négatif"));
            }
            Ok(x.sqrt())
        }

        Factorielle => factorielle(arg(0)),
        Arrangement => arrangement(arg(0), arg(1)),
        Combinaison => combinaison(arg(0), arg(1)),

        Alea => Ok(alea(ctx.graine)),
        AleaEntier => {
            if v.is_empty() {
                alea_entier(0.0, 100.0, ctx.graine)
            } else {
                alea_entier(arg(0), arg(1), ctx.graine)
            }
        }

        Dms => Ok(dms_vers_decimal(arg(0), arg(1), arg(2), ctx.mode)),
        DepuisRad => Ok(rad_vers_mode(arg(0), ctx.mode)),
        DepuisGrad => Ok(grad_vers_mode(arg(0), ctx.mode)),

        RectPolR => Ok(rect_vers_pol_r(arg(0), arg(1))),
        RectPolTheta => Ok(rect_vers_pol_theta(arg(0), arg(1), ctx.mode)),
        PolRectX => Ok(pol_vers_rect_x(arg(0), arg(1), ctx.mode)),
        PolRectY => Ok(pol_vers_rect_y(arg(0), arg(1), ctx.mode)),
    }
}

/* ------------------------ Affichage debug (traces) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(v) => write!(f, "{v}"),
            Pi => write!(f, "π"),
            Euler => write!(f, "e"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Appel(nom, args) => {
                write!(f, "{nom:?}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
