//! Random username generation
//!
//! Fallback names assigned when the user leaves the username prompt empty.

use rand::Rng;

pub const FUNNY_NAMES: [&str; 10] = [
    "GatoSaltarin",
    "ZorroFeliz",
    "PandaTravieso",
    "LoboSabio",
    "ElefanteBailarin",
    "ConejoLoco",
    "TortugaRapida",
    "LeonDormilon",
    "OsoJugueton",
    "PulpoIngenioso",
];

/// Picks a random name from the fixed list.
pub fn random_username() -> String {
    let idx = rand::thread_rng().gen_range(0..FUNNY_NAMES.len());
    FUNNY_NAMES[idx].to_string()
}
