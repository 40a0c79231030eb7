//! Residue alphabet used by the one-hot encoding.

/// Padding symbol for window positions that fall off either end of the sequence.
pub const PAD: char = '*';

/// The 20 standard amino acids followed by the padding symbol.
pub const ALPHABET: [char; 21] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V',
    'W', 'Y', PAD,
];

pub const ALPHABET_SIZE: usize = ALPHABET.len();

/// Column of `residue` in the one-hot encoding. Non-standard residues (X, U, B, ...) have none.
pub fn residue_index(residue: char) -> Option<usize> {
    let residue = residue.to_ascii_uppercase();
    ALPHABET.iter().position(|&c| c == residue)
}
