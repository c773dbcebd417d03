mod collect;
mod parse;

pub use collect::{CloudSeed, SeedSource, demo_seed, load_seed};
pub use parse::{WordEntry, parse_thesaurus, parse_word_list};
