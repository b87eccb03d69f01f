// src/noyau/constantes.rs
//
// Constantes physiques (valeurs CODATA), rangées par groupe comme sur la calculatrice.
// La recherche par nom parcourt les groupes dans l’ordre : “e” désigne donc la charge
// élémentaire ici, pas la constante d’Euler des expressions.

use std::f64::consts::PI;

use super::erreur::ErreurNoyau;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Groupe {
    General,
    Electromagnetic,
    AtomicNuclear,
    PhysChem,
    Adopted,
    Others,
}

impl Groupe {
    pub const TOUS: [Groupe; 6] = [
        Groupe::General,
        Groupe::Electromagnetic,
        Groupe::AtomicNuclear,
        Groupe::PhysChem,
        Groupe::Adopted,
        Groupe::Others,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Groupe::General => "General",
            Groupe::Electromagnetic => "Electromagnetic",
            Groupe::AtomicNuclear => "Atomic_Nuclear",
            Groupe::PhysChem => "Phys_Chem",
            Groupe::Adopted => "Adopted",
            Groupe::Others => "Others",
        }
    }

    pub fn constantes(self) -> &'static [(&'static str, f64)] {
        match self {
            Groupe::General => GENERAL,
            Groupe::Electromagnetic => ELECTROMAGNETIC,
            Groupe::AtomicNuclear => ATOMIC_NUCLEAR,
            Groupe::PhysChem => PHYS_CHEM,
            Groupe::Adopted => ADOPTED,
            Groupe::Others => OTHERS,
        }
    }
}

const GENERAL: &[(&str, f64)] = &[
    ("c", 2.99792458e8),
    ("g", 9.80665),
    ("h", 6.62607015e-34),
    ("G", 6.67430e-11),
    ("Na", 6.02214076e23),
    ("k", 1.380649e-23),
    ("R", 8.314462618),
    ("eV", 1.602176634e-19),
];

const ELECTROMAGNETIC: &[(&str, f64)] = &[
    ("e", 1.602176634e-19),
    ("mu_0", 1.25663706212e-6),
    ("eps_0", 8.8541878128e-12),
    ("KJ", 4.835978484e14),
    ("RK", 25812.80745),
];

const ATOMIC_NUCLEAR: &[(&str, f64)] = &[
    ("m_e", 9.1093837015e-31),
    ("m_p", 1.67262192369e-27),
    ("m_n", 1.67492749804e-27),
    ("e_over_me", 1.75882001076e11),
    ("u", 1.66053906660e-27),
];

const PHYS_CHEM: &[(&str, f64)] = &[
    ("atm", 1.01325e5),
    ("Vm", 22.41396954),
    ("F", 96485.33212),
];

// mmHg en pascals
const ADOPTED: &[(&str, f64)] = &[
    ("cal", 4.184),
    ("eV", 1.602176634e-19),
    ("mmHg", 133.322368),
    ("inch", 0.0254),
    ("lb", 0.45359237),
];

const OTHERS: &[(&str, f64)] = &[
    ("phi", 1.618033988749895),
    ("pi", PI),
    ("deg_to_rad", PI / 180.0),
    ("rad_to_deg", 180.0 / PI),
];

/// Valeur d’une constante par nom exact (sensible à la casse), premier groupe trouvé.
pub fn get_constant(nom: &str) -> Result<f64, ErreurNoyau> {
    Groupe::TOUS
        .iter()
        .flat_map(|g| g.constantes())
        .find(|(n, _)| *n == nom)
        .map(|&(_, v)| v)
        .ok_or_else(|| ErreurNoyau::evaluation(format!("constante inconnue '{nom}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::erreur::ErrorKind;

    #[test]
    fn recherche_par_nom() {
        assert_eq!(get_constant("c").unwrap(), 299_792_458.0);
        assert_eq!(get_constant("G").unwrap(), 6.67430e-11);
        assert_eq!(get_constant("g").unwrap(), 9.80665);
        assert_eq!(get_constant("e").unwrap(), 1.602176634e-19);
        assert_eq!(get_constant("pi").unwrap(), PI);
        assert!((get_constant("phi").unwrap() - (1.0 + 5f64.sqrt()) / 2.0).abs() < 1e-15);
    }

    #[test]
    fn nom_inconnu() {
        assert_eq!(get_constant("C").unwrap_err().kind(), ErrorKind::Evaluation);
        assert_eq!(get_constant("").unwrap_err().kind(), ErrorKind::Evaluation);
    }

    #[test]
    fn noms_uniques_par_groupe() {
        for g in Groupe::TOUS {
            let noms: Vec<_> = g.constantes().iter().map(|(n, _)| *n).collect();
            let mut tries = noms.clone();
            tries.sort_unstable();
            tries.dedup();
            assert_eq!(tries.len(), noms.len(), "{}", g.nom());
        }
    }
}
