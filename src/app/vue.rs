// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Barre des modes : DEG/RAD/GRA, affichage D/S, racines complexes, langue des issues
// - Onglets : Calcul (expression, STO, d/dx ∫ Σ Π), Polynôme, Système, Opérations
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus)
// - Erreur : libellé écran (Math ERROR...) + diagnostic du noyau en dessous
//
// Note : PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use std::fmt;

use eframe::egui;

use calculatrice_fx580::noyau::angle::AngleUnit;
use calculatrice_fx580::noyau::constantes::get_constant;
use calculatrice_fx580::noyau::erreur::ErreurNoyau;
use calculatrice_fx580::noyau::fonctions::{self, Hyperbolique};
use calculatrice_fx580::noyau::issue::{Langue, Outcome};
use calculatrice_fx580::noyau::memoire::EMPLACEMENTS;
use calculatrice_fx580::noyau::normalise::{normalize, DisplayMode};
use calculatrice_fx580::noyau::premiers::{factorize, format_factorisation};
use calculatrice_fx580::noyau::systeme::{self, Critere};
use calculatrice_fx580::noyau::polynome;

use super::etat::{AppCalc, Demarche, Onglet};

const LETTRES: [&str; 5] = ["a", "b", "c", "d", "e"];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice FX-580");
                ui.add_space(6.0);

                self.ui_modes(ui);
                ui.add_space(4.0);
                self.ui_onglets(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                match self.onglet {
                    Onglet::Calcul => self.ui_calcul(ui),
                    Onglet::Polynome => self.ui_polynome(ui),
                    Onglet::Systeme => self.ui_systeme(ui),
                    Onglet::Operations => self.ui_operations(ui),
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                if self.onglet == Onglet::Calcul {
                    ui.add_space(8.0);
                    self.ui_demarche(ui);
                }
            });
    }

    /* ------------------------ Modes + onglets ------------------------ */

    fn ui_modes(&mut self, ui: &mut egui::Ui) {
        let avant = self.reglages;
        self.ui_barre_modes(ui);
        if self.reglages != avant {
            self.enregistre_reglages();
        }
    }

    fn ui_barre_modes(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let courant = self.session.angle().unit();
            for u in AngleUnit::TOUTES {
                if ui.selectable_label(courant == u, u.jeton()).clicked() {
                    self.session.set_unit(u);
                    self.reglages.angle = u;
                }
            }

            ui.separator();

            let affichage = self.session.affichage();
            for (mode, label, tip) in [
                (DisplayMode::Decimal, "D", "Affichage décimal"),
                (DisplayMode::Simplified, "S", "Fractions et radicaux"),
            ] {
                let resp = ui.selectable_label(affichage == mode, label).on_hover_text(tip);
                if resp.clicked() {
                    self.session.set_affichage(mode);
                    self.reglages.affichage = mode;
                }
            }

            ui.separator();
            ui.checkbox(&mut self.reglages.complexe, "ℂ")
                .on_hover_text("Racines complexes des polynômes");

            ui.separator();
            ui.selectable_value(&mut self.reglages.langue, Langue::En, "EN");
            ui.selectable_value(&mut self.reglages.langue, Langue::Vi, "VI");
            ui.selectable_value(&mut self.reglages.langue, Langue::Fr, "FR");
        });
    }

    fn ui_onglets(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (onglet, titre) in [
                (Onglet::Calcul, "Calcul"),
                (Onglet::Polynome, "Polynôme"),
                (Onglet::Systeme, "Système"),
                (Onglet::Operations, "Opérations"),
            ] {
                if ui.selectable_value(&mut self.onglet, onglet, titre).clicked() {
                    self.clear_resultats();
                }
            }
        });
    }

    /* ------------------------ Onglet Calcul ------------------------ */

    fn ui_calcul(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2sin(30), 3(A+1), log(2,8), √2")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // C = entrée seulement ; CLR = résultats seulement ; AC = tout (mémoire comprise)
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Efface résultat + erreur + démarche", Action::ClearResultats);
            self.bouton_action(ui, "AC", "Remise à zéro totale (mémoire comprise)", Action::ResetTotal);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            for op in ["(", ")", "+", "-", "×", "÷", "^"] {
                self.bouton_insert(ui, op, op);
            }
            ui.separator();
            self.bouton_insert(ui, "π", "π");
            self.bouton_insert(ui, "e", "e");
            self.bouton_insert(ui, "√", "√(");
            for f in ["sin", "cos", "tan", "ln", "log"] {
                self.bouton_insert(ui, f, &format!("{f}("));
            }
        });

        ui.horizontal_wrapped(|ui| {
            for nom in EMPLACEMENTS {
                self.bouton_insert(ui, nom, nom);
            }
        });

        ui.add_space(8.0);
        self.ui_pave_numerique(ui);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("emplacement_sto")
                .selected_text(self.emplacement.as_str())
                .width(48.0)
                .show_ui(ui, |ui| {
                    for nom in EMPLACEMENTS {
                        ui.selectable_value(&mut self.emplacement, nom.to_string(), nom);
                    }
                });
            if ui.button("STO").on_hover_text("Range le résultat de l’entrée").clicked() {
                self.stocke_via_noyau();
            }
        });

        ui.add_space(8.0);
        self.ui_analyse(ui);
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_fx580")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for c in rangee {
                        self.bouton_insert(ui, c, c);
                    }
                    match rangee[0] {
                        "7" => self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace),
                        "4" => self.bouton_insert(ui, ",", ","),
                        _ => self.bouton_insert(ui, ".", "."),
                    }
                    ui.end_row();
                }
                self.bouton_insert(ui, "0", "0");
                ui.end_row();
            });
    }

    fn ui_analyse(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("d/dx, ∫, Σ, Π")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("variable :");
                    ui.add(egui::TextEdit::singleline(&mut self.analyse.var).desired_width(40.0));
                    ui.label("de");
                    ui.add(egui::DragValue::new(&mut self.analyse.bas).speed(0.1));
                    ui.label("à");
                    ui.add(egui::DragValue::new(&mut self.analyse.haut).speed(0.1));
                });
                ui.horizontal(|ui| {
                    for op in [Analyse::Derivee, Analyse::Integrale, Analyse::Somme, Analyse::Produit] {
                        if ui.button(op.to_string()).on_hover_text(op.aide()).clicked() {
                            self.analyse_via_noyau(op);
                        }
                    }
                });
            });
    }

    /* ------------------------ Onglet Polynôme ------------------------ */

    fn ui_polynome(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Degré :");
            for d in 1..=4 {
                ui.selectable_value(&mut self.polynome.degre, d, d.to_string());
            }
        });

        let degre = self.polynome.degre;
        ui.horizontal_wrapped(|ui| {
            for (i, c) in self.polynome.coeffs[..=degre].iter_mut().enumerate() {
                ui.label(format!("{} :", LETTRES[i]));
                ui.add(egui::DragValue::new(c).speed(0.1));
            }
        });

        if ui.button("Résoudre").clicked() {
            let issue = polynome::solve(self.polynome.actifs(), self.reglages.complexe);
            self.depose_issue(issue);
        }
    }

    /* ------------------------ Onglet Système ------------------------ */

    fn ui_systeme(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Inconnues :");
            ui.selectable_value(&mut self.systeme.inconnues, 2, "2");
            ui.selectable_value(&mut self.systeme.inconnues, 3, "3");
        });

        let n = self.systeme.inconnues;
        egui::Grid::new("coefficients_systeme")
            .num_columns(n + 1)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                for l in LETTRES.iter().take(n + 1) {
                    ui.label(*l);
                }
                ui.end_row();
                for ligne in self.systeme.lignes.iter_mut().take(n) {
                    for c in ligne.iter_mut().take(n + 1) {
                        ui.add(egui::DragValue::new(c).speed(0.1));
                    }
                    ui.end_row();
                }
            });

        if ui.button("Résoudre").clicked() {
            let l = &self.systeme.lignes;
            let issue = if n == 2 {
                systeme::solve_two(l[0][0], l[0][1], l[0][2], l[1][0], l[1][1], l[1][2])
            } else {
                systeme::solve_three(l)
            };
            let mode = self.session.affichage();
            self.depose_issue(issue.map(|o| o.map(|s| s.avec_mode(mode))));
        }

        if n == 3 {
            ui.add_space(8.0);
            egui::CollapsingHeader::new("Prédiction entière (équations 1 et 2)")
                .default_open(false)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("z de");
                        ui.add(egui::DragValue::new(&mut self.systeme.z_min));
                        ui.label("à");
                        ui.add(egui::DragValue::new(&mut self.systeme.z_max));
                        ui.selectable_value(&mut self.systeme.critere, Critere::Naturels, "ℕ");
                        ui.selectable_value(&mut self.systeme.critere, Critere::Entiers, "ℤ");
                    });
                    if ui.button("Prédire").clicked() {
                        self.prediction_via_noyau();
                    }
                });
        }
    }

    /* ------------------------ Onglet Opérations ------------------------ */

    fn ui_operations(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("x :");
            ui.add(egui::DragValue::new(&mut self.operations.x).speed(0.1));
            ui.label("y :");
            ui.add(egui::DragValue::new(&mut self.operations.y).speed(0.1));
        });

        ui.horizontal_wrapped(|ui| {
            let (x, y) = (self.operations.x, self.operations.y);
            if ui.button("√x").clicked() {
                self.depose_valeur(fonctions::sqrt(x));
            }
            if ui.button("ʸ√x").clicked() {
                self.depose_valeur(fonctions::nth_root(x, y));
            }
            if ui.button("log_y(x)").clicked() {
                self.depose_valeur(fonctions::log_base(y, x));
            }
            if ui.button("ln x").clicked() {
                self.depose_valeur(fonctions::ln(x));
            }
            for h in Hyperbolique::TOUTES {
                if ui.button(h.nom()).clicked() {
                    self.depose_valeur(fonctions::hyperbolique(h, x));
                }
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("n :");
            ui.add(egui::DragValue::new(&mut self.operations.n).range(1..=10_000_000_000u64));
            if ui.button("FACT").on_hover_text("Décomposition en facteurs premiers").clicked() {
                let f = factorize(self.operations.n);
                self.set_resultat(format_factorisation(&f), None);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Constante :");
            ui.add(egui::TextEdit::singleline(&mut self.operations.constante).desired_width(90.0));
            if ui.button("CONST").clicked() {
                let nom = self.operations.constante.trim().to_string();
                match get_constant(&nom) {
                    Ok(v) => self.set_resultat(format!("{v:e}"), None),
                    Err(e) => self.set_erreur(&e),
                }
            }
        });
    }

    /* ------------------------ Sorties ------------------------ */

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
            if !self.detail.is_empty() {
                ui.small(&self.detail);
            }
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                let d = &self.demarche;
                Self::champ_demarche(ui, "Prétraité", "demarche_pretraite", &d.pretraite);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                Self::champ_demarche(ui, "Chemin", "demarche_chemin", &d.chemin);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    /* ------------------------ Boutons ------------------------ */

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    /// Insertion brute : le prétraitement du noyau gère la multiplication implicite.
    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        if ui.add_sized([46.0, 28.0], egui::Button::new(label)).clicked() {
            self.entree.push_str(to_insert);
            self.focus_entree = true;
        }
    }

    /// Backspace “intelligent” : retire d’un coup un appel de fonction ("sin(", "√(").
    fn backspace_entree(&mut self) {
        for pat in ["sqrt(", "sin(", "cos(", "tan(", "log(", "ln(", "√(", "pi"] {
            if let Some(reste) = self.entree.strip_suffix(pat) {
                let n = reste.len();
                self.entree.truncate(n);
                return;
            }
        }
        self.entree.pop();
    }

    /* ------------------------ Appels au noyau ------------------------ */

    fn eval_via_noyau(&mut self) {
        match self.session.evaluate(&self.entree, true) {
            Ok(ev) => {
                let d = Demarche::from(ev.demarche);
                self.set_resultat(ev.resultat.to_string(), Some(d));
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    fn stocke_via_noyau(&mut self) {
        let nom = self.emplacement.clone();
        match self.session.stocke(&nom, &self.entree) {
            Ok(v) => {
                let rendu = normalize(v, self.session.affichage());
                self.set_resultat(format!("{rendu} → {nom}"), None);
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    fn analyse_via_noyau(&mut self, op: Analyse) {
        let (texte, var) = (self.entree.as_str(), self.analyse.var.trim());
        let (bas, haut) = (self.analyse.bas, self.analyse.haut);
        let r = match op {
            Analyse::Derivee => self.session.differentiate(texte, var, Some(bas)),
            Analyse::Integrale => self.session.integrate(texte, var, bas, haut),
            Analyse::Somme => self.session.sum(texte, var, bas, haut),
            Analyse::Produit => self.session.product(texte, var, bas, haut),
        };
        match r {
            Ok(v) => self.set_resultat(v.to_string(), None),
            Err(e) => self.set_erreur(&e),
        }
    }

    fn prediction_via_noyau(&mut self) {
        let s = &self.systeme;
        let r = systeme::predict_integer_solutions(s.lignes[0], s.lignes[1], s.z_min, s.z_max, s.critere);
        match r {
            Ok(v) if v.is_empty() => {
                let aucune: Outcome<()> = Outcome::NoSolution;
                self.set_resultat(aucune.libelle(self.reglages.langue).unwrap_or_default(), None);
            }
            Ok(v) => {
                let lignes: Vec<String> = v
                    .iter()
                    .map(|[x, y, z]| format!("({x}, {y}, {z})"))
                    .collect();
                self.set_resultat(lignes.join("\n"), None);
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    fn depose_valeur(&mut self, r: Result<f64, ErreurNoyau>) {
        match r {
            Ok(v) => {
                let rendu = normalize(v, self.session.affichage());
                self.set_resultat(rendu.to_string(), None);
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    fn depose_issue<T: fmt::Display>(&mut self, r: Result<Outcome<T>, ErreurNoyau>) {
        match r {
            Ok(issue) => {
                let texte = match issue.solved() {
                    Some(t) => t.to_string(),
                    None => issue.libelle(self.reglages.langue).unwrap_or_default().to_string(),
                };
                self.set_resultat(texte, None);
            }
            Err(e) => self.set_erreur(&e),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum Analyse {
    Derivee,
    Integrale,
    Somme,
    Produit,
}

impl Analyse {
    fn aide(self) -> &'static str {
        match self {
            Analyse::Derivee => "Dérivée en « de »",
            Analyse::Integrale => "Intégrale de « de » à « à »",
            Analyse::Somme => "Somme sur les entiers de « de » à « à »",
            Analyse::Produit => "Produit sur les entiers de « de » à « à »",
        }
    }
}

impl fmt::Display for Analyse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Analyse::Derivee => "d/dx",
            Analyse::Integrale => "∫",
            Analyse::Somme => "Σ",
            Analyse::Produit => "Π",
        })
    }
}
