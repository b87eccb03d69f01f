// src/lib.rs
//
// Noyau de la calculatrice, utilisable sans l’interface egui.

pub mod noyau;
