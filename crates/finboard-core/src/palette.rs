//! Stable per-category display colors

use sha2::{Digest, Sha256};

/// Palette shared by the share chart and expense list
pub const PALETTE: [&str; 10] = [
    "#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#06B6D4", "#84CC16",
    "#F97316", "#6366F1",
];

/// Pick a palette color for a category; the same label always gets the same color
pub fn category_color(category: &str) -> &'static str {
    let digest = Sha256::digest(category.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let index = u64::from_be_bytes(prefix) % PALETTE.len() as u64;
    PALETTE[index as usize]
}

/// Split a "#RRGGBB" color into its components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
