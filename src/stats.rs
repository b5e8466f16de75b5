// src/stats.rs
//
// Moteur de statistiques.
// - 1 variable : paires (valeur, effectif ≥ 1), cumulées par indice
// - 2 variables : paires (x, y), non pondérées
// Calculs descriptifs + régression linéaire (moindres carrés) + corrélation.
//
// Politique : aucun calcul ne lève — n < 2 ou dénominateur nul dégradent
// la sortie à 0 (l'UI affiche 0, pas une erreur).

#[derive(Debug, Default)]
pub struct MoteurStats {
    donnees_1var: Vec<(f64, u32)>,
    donnees_2var: Vec<(f64, f64)>,
}

/// Statistiques à 1 variable (pondérées par l'effectif).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats1Var {
    pub n: u64,
    pub moyenne: f64,
    /// Écart-type d'échantillon (dénominateur n-1).
    pub ecart_type: f64,
    /// Écart-type de population (dénominateur n).
    pub ecart_type_pop: f64,
    pub somme_x: f64,
    pub somme_x2: f64,
}

/// Statistiques à 2 variables + droite de régression y = b + a·x.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats2Var {
    pub n: usize,
    pub moyenne_x: f64,
    pub ecart_type_x: f64,
    pub ecart_type_pop_x: f64,
    pub moyenne_y: f64,
    pub ecart_type_y: f64,
    pub ecart_type_pop_y: f64,
    pub somme_x: f64,
    pub somme_x2: f64,
    pub somme_y: f64,
    pub somme_y2: f64,
    pub somme_xy: f64,
    /// Pente a de la droite ajustée.
    pub pente: f64,
    /// Ordonnée à l'origine b.
    pub ordonnee: f64,
    /// Coefficient de corrélation de Pearson.
    pub correlation: f64,
    /// Valeurs centrées x - x̄ (notées x' sur la machine).
    pub x_centres: Vec<f64>,
    /// Valeurs centrées y - ȳ (notées y').
    pub y_centres: Vec<f64>,
}

impl MoteurStats {
    pub fn new() -> Self {
        Self::default()
    }

    /* ------------------------ saisie ------------------------ */

    /// Ajoute une valeur 1-var ; l'effectif est ramené à 1 au minimum.
    pub fn ajouter_1var(&mut self, valeur: f64, effectif: u32) {
        self.donnees_1var.push((valeur, effectif.max(1)));
    }

    /// Écrit la paire à l'indice donné (1-based) ; les trous sont comblés
    /// par le neutre (0, 1), comme la saisie par navigation.
    pub fn definir_1var(&mut self, indice: usize, valeur: f64, effectif: u32) {
        if indice == 0 {
            return;
        }
        while self.donnees_1var.len() < indice {
            self.donnees_1var.push((0.0, 1));
        }
        self.donnees_1var[indice - 1] = (valeur, effectif.max(1));
    }

    pub fn ajouter_2var(&mut self, x: f64, y: f64) {
        self.donnees_2var.push((x, y));
    }

    /// Écrit la paire à l'indice donné (1-based) ; trous comblés par (0, 0).
    pub fn definir_2var(&mut self, indice: usize, x: f64, y: f64) {
        if indice == 0 {
            return;
        }
        while self.donnees_2var.len() < indice {
            self.donnees_2var.push((0.0, 0.0));
        }
        self.donnees_2var[indice - 1] = (x, y);
    }

    pub fn donnees_1var(&self) -> &[(f64, u32)] {
        &self.donnees_1var
    }

    pub fn donnees_2var(&self) -> &[(f64, f64)] {
        &self.donnees_2var
    }

    /// Vide les deux échantillons ; rend true si quelque chose a été effacé.
    pub fn effacer_tout(&mut self) -> bool {
        let avait = !self.donnees_1var.is_empty() || !self.donnees_2var.is_empty();
        self.donnees_1var.clear();
        self.donnees_2var.clear();
        avait
    }

    /* ------------------------ calculs 1 variable ------------------------ */

    pub fn stats_1var(&self) -> Stats1Var {
        if self.donnees_1var.is_empty() {
            return Stats1Var::default();
        }

        let n: u64 = self.donnees_1var.iter().map(|&(_, f)| f as u64).sum();
        let nf = n as f64;

        let somme_x: f64 = self
            .donnees_1var
            .iter()
            .map(|&(x, f)| x * f as f64)
            .sum();
        let moyenne = if n > 0 { somme_x / nf } else { 0.0 };

        // somme pondérée des carrés des écarts
        let somme_carres: f64 = self
            .donnees_1var
            .iter()
            .map(|&(x, f)| (x - moyenne).powi(2) * f as f64)
            .sum();

        let ecart_type = if n > 1 {
            (somme_carres / (nf - 1.0)).sqrt()
        } else {
            0.0
        };
        let ecart_type_pop = if n > 0 { (somme_carres / nf).sqrt() } else { 0.0 };

        let somme_x2: f64 = self
            .donnees_1var
            .iter()
            .map(|&(x, f)| x * x * f as f64)
            .sum();

        Stats1Var {
            n,
            moyenne,
            ecart_type,
            ecart_type_pop,
            somme_x,
            somme_x2,
        }
    }

    /* ------------------------ calculs 2 variables ------------------------ */

    pub fn stats_2var(&self) -> Stats2Var {
        if self.donnees_2var.is_empty() {
            return Stats2Var::default();
        }

        let n = self.donnees_2var.len();
        let nf = n as f64;

        let somme_x: f64 = self.donnees_2var.iter().map(|&(x, _)| x).sum();
        let somme_y: f64 = self.donnees_2var.iter().map(|&(_, y)| y).sum();
        let somme_x2: f64 = self.donnees_2var.iter().map(|&(x, _)| x * x).sum();
        let somme_y2: f64 = self.donnees_2var.iter().map(|&(_, y)| y * y).sum();
        let somme_xy: f64 = self.donnees_2var.iter().map(|&(x, y)| x * y).sum();

        let moyenne_x = somme_x / nf;
        let moyenne_y = somme_y / nf;

        let ecarts = |somme2: f64, moyenne: f64| -> (f64, f64) {
            let var_ech = if n > 1 {
                (somme2 - nf * moyenne * moyenne) / (nf - 1.0)
            } else {
                0.0
            };
            let var_pop = (somme2 - nf * moyenne * moyenne) / nf;
            (
                if var_ech > 0.0 { var_ech.sqrt() } else { 0.0 },
                if var_pop > 0.0 { var_pop.sqrt() } else { 0.0 },
            )
        };
        let (ecart_type_x, ecart_type_pop_x) = ecarts(somme_x2, moyenne_x);
        let (ecart_type_y, ecart_type_pop_y) = ecarts(somme_y2, moyenne_y);

        // moindres carrés : a = (nΣxy - ΣxΣy) / (nΣx² - (Σx)²), b = ȳ - a·x̄
        let numerateur = nf * somme_xy - somme_x * somme_y;
        let denominateur = nf * somme_x2 - somme_x * somme_x;
        let pente = if denominateur != 0.0 {
            numerateur / denominateur
        } else {
            0.0
        };
        let ordonnee = moyenne_y - pente * moyenne_x;

        let racine = (nf * somme_x2 - somme_x * somme_x).max(0.0).sqrt()
            * (nf * somme_y2 - somme_y * somme_y).max(0.0).sqrt();
        let correlation = if racine != 0.0 { numerateur / racine } else { 0.0 };

        let x_centres = self
            .donnees_2var
            .iter()
            .map(|&(x, _)| x - moyenne_x)
            .collect();
        let y_centres = self
            .donnees_2var
            .iter()
            .map(|&(_, y)| y - moyenne_y)
            .collect();

        Stats2Var {
            n,
            moyenne_x,
            ecart_type_x,
            ecart_type_pop_x,
            moyenne_y,
            ecart_type_y,
            ecart_type_pop_y,
            somme_x,
            somme_x2,
            somme_y,
            somme_y2,
            somme_xy,
            pente,
            ordonnee,
            correlation,
            x_centres,
            y_centres,
        }
    }

    /* ------------------------ prédiction sur la droite ------------------------ */

    /// x' : antécédent de y sur la droite ajustée, x = (y - b) / a.
    pub fn prevoir_x(&self, y: f64) -> f64 {
        if self.donnees_2var.len() < 2 {
            return 0.0;
        }
        let s = self.stats_2var();
        if s.pente == 0.0 {
            return 0.0;
        }
        (y - s.ordonnee) / s.pente
    }

    /// y' : image de x sur la droite ajustée, ŷ = b + a·x.
    pub fn prevoir_y(&self, x: f64) -> f64 {
        if self.donnees_2var.len() < 2 {
            return 0.0;
        }
        let s = self.stats_2var();
        s.ordonnee + s.pente * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proche(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "a={a} b={b}");
    }

    #[test]
    fn une_variable_simple() {
        let mut mo = MoteurStats::new();
        mo.ajouter_1var(1.0, 1);
        mo.ajouter_1var(2.0, 1);
        mo.ajouter_1var(3.0, 1);

        let s = mo.stats_1var();
        assert_eq!(s.n, 3);
        proche(s.moyenne, 2.0);
        proche(s.ecart_type, 1.0);
        proche(s.ecart_type_pop, (2.0_f64 / 3.0).sqrt());
        proche(s.somme_x, 6.0);
        proche(s.somme_x2, 14.0);
    }

    #[test]
    fn une_variable_ponderee() {
        let mut mo = MoteurStats::new();
        mo.ajouter_1var(2.0, 3);
        mo.ajouter_1var(5.0, 1);

        let s = mo.stats_1var();
        assert_eq!(s.n, 4);
        proche(s.moyenne, 11.0 / 4.0);
        proche(s.somme_x, 11.0);
        proche(s.somme_x2, 12.0 + 25.0);
    }

    #[test]
    fn effectif_ramene_a_un() {
        let mut mo = MoteurStats::new();
        mo.ajouter_1var(7.0, 0);
        assert_eq!(mo.donnees_1var(), &[(7.0, 1)]);
    }

    #[test]
    fn saisie_par_indice_comble_les_trous() {
        let mut mo = MoteurStats::new();
        mo.definir_1var(3, 9.0, 2);
        assert_eq!(mo.donnees_1var(), &[(0.0, 1), (0.0, 1), (9.0, 2)]);

        let mut mo = MoteurStats::new();
        mo.definir_2var(2, 1.0, 2.0);
        assert_eq!(mo.donnees_2var(), &[(0.0, 0.0), (1.0, 2.0)]);
        // réécriture en place
        mo.definir_2var(1, 5.0, 6.0);
        assert_eq!(mo.donnees_2var()[0], (5.0, 6.0));
    }

    #[test]
    fn vide_rend_des_zeros() {
        let mo = MoteurStats::new();
        assert_eq!(mo.stats_1var(), Stats1Var::default());
        assert_eq!(mo.stats_2var(), Stats2Var::default());
        proche(mo.prevoir_x(3.0), 0.0);
        proche(mo.prevoir_y(3.0), 0.0);
    }

    #[test]
    fn regression_parfaite() {
        let mut mo = MoteurStats::new();
        mo.ajouter_2var(1.0, 2.0);
        mo.ajouter_2var(2.0, 4.0);
        mo.ajouter_2var(3.0, 6.0);

        let s = mo.stats_2var();
        assert_eq!(s.n, 3);
        proche(s.pente, 2.0);
        proche(s.ordonnee, 0.0);
        proche(s.correlation, 1.0);
        proche(s.somme_xy, 28.0);

        proche(mo.prevoir_y(4.0), 8.0);
        proche(mo.prevoir_x(8.0), 4.0);
    }

    #[test]
    fn regression_affine() {
        // y = 3 + 0.5x, bruit nul
        let mut mo = MoteurStats::new();
        for x in [1.0, 2.0, 4.0, 8.0] {
            mo.ajouter_2var(x, 3.0 + 0.5 * x);
        }
        let s = mo.stats_2var();
        proche(s.pente, 0.5);
        proche(s.ordonnee, 3.0);
        proche(s.correlation, 1.0);
    }

    #[test]
    fn valeurs_centrees() {
        let mut mo = MoteurStats::new();
        mo.ajouter_2var(1.0, 10.0);
        mo.ajouter_2var(3.0, 20.0);
        let s = mo.stats_2var();
        assert_eq!(s.x_centres, vec![-1.0, 1.0]);
        assert_eq!(s.y_centres, vec![-5.0, 5.0]);
    }

    #[test]
    fn degradations_a_zero() {
        // un seul point : écarts-type et prédictions à 0
        let mut mo = MoteurStats::new();
        mo.ajouter_2var(2.0, 5.0);
        let s = mo.stats_2var();
        assert_eq!(s.n, 1);
        proche(s.ecart_type_x, 0.0);
        proche(mo.prevoir_y(1.0), 0.0);

        // x constants : pente dégradée à 0, pas de division par zéro
        let mut mo = MoteurStats::new();
        mo.ajouter_2var(2.0, 1.0);
        mo.ajouter_2var(2.0, 5.0);
        let s = mo.stats_2var();
        proche(s.pente, 0.0);
        proche(s.correlation, 0.0);
        proche(mo.prevoir_x(3.0), 0.0);
    }

    #[test]
    fn effacement() {
        let mut mo = MoteurStats::new();
        assert!(!mo.effacer_tout());
        mo.ajouter_1var(1.0, 1);
        assert!(mo.effacer_tout());
        assert!(mo.donnees_1var().is_empty());
    }
}
