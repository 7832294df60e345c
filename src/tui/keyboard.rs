//! On-screen keyboard layout and mouse hit testing.

use ratatui::layout::Rect;

use crate::input::VirtualKey;

/// Key tokens, top row first.
pub const KEY_ROWS: [&[&str]; 3] = [
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
    &["ENTER", "Z", "X", "C", "V", "B", "N", "M", "←"],
];

/// Width of a letter key, borders included.
pub const KEY_WIDTH: u16 = 5;
/// Width of `ENTER` and `←`.
pub const WIDE_KEY_WIDTH: u16 = 9;
/// Height of every key, borders included.
pub const KEY_HEIGHT: u16 = 3;
/// Horizontal gap between keys.
pub const KEY_GAP: u16 = 1;

/// Height of the whole keyboard.
pub const KEYBOARD_HEIGHT: u16 = KEY_HEIGHT * KEY_ROWS.len() as u16;

/// A key and where it was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHit {
    /// Screen area of the key.
    pub area: Rect,
    /// The key.
    pub key: VirtualKey,
}

fn key_width(key: VirtualKey) -> u16 {
    match key {
        VirtualKey::Letter(_) => KEY_WIDTH,
        VirtualKey::Enter | VirtualKey::Back => WIDE_KEY_WIDTH,
    }
}

/// Keys of each row.
pub fn keyboard_rows() -> Vec<Vec<VirtualKey>> {
    KEY_ROWS
        .iter()
        .map(|row| row.iter().filter_map(|t| VirtualKey::from_token(t)).collect())
        .collect()
}

/// Lays the keyboard out inside `area`, each row centred.
///
/// Keys that do not fit are left out.
pub fn layout_keys(area: Rect) -> Vec<KeyHit> {
    let mut hits = Vec::new();
    for (row_index, keys) in keyboard_rows().into_iter().enumerate() {
        let y = area.y + row_index as u16 * KEY_HEIGHT;
        if y + KEY_HEIGHT > area.y + area.height {
            break;
        }

        let row_width: u16 = keys.iter().map(|k| key_width(*k)).sum::<u16>()
            + KEY_GAP * (keys.len() as u16).saturating_sub(1);
        let mut x = area.x + area.width.saturating_sub(row_width) / 2;

        for key in keys {
            let width = key_width(key);
            if x + width > area.x + area.width {
                break;
            }
            hits.push(KeyHit {
                area: Rect::new(x, y, width, KEY_HEIGHT),
                key,
            });
            x += width + KEY_GAP;
        }
    }
    hits
}

/// Finds the key under a screen cell.
pub fn hit_test(hits: &[KeyHit], column: u16, row: u16) -> Option<VirtualKey> {
    hits.iter()
        .find(|hit| {
            column >= hit.area.x
                && column < hit.area.x + hit.area.width
                && row >= hit.area.y
                && row < hit.area.y + hit.area.height
        })
        .map(|hit| hit.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_contains_every_key() {
        let hits = layout_keys(Rect::new(0, 0, 80, KEYBOARD_HEIGHT));
        assert_eq!(hits.len(), 10 + 9 + 9);
        assert!(hits.iter().any(|h| h.key == VirtualKey::Enter));
        assert!(hits.iter().any(|h| h.key == VirtualKey::Back));
    }

    #[test]
    fn clicks_resolve_to_keys() {
        let hits = layout_keys(Rect::new(0, 10, 80, KEYBOARD_HEIGHT));
        let q = hits[0];
        assert_eq!(q.key, VirtualKey::Letter('Q'));
        assert_eq!(hit_test(&hits, q.area.x + 1, q.area.y + 1), Some(VirtualKey::Letter('Q')));
        // The gap after Q belongs to no key.
        assert_eq!(hit_test(&hits, q.area.x + KEY_WIDTH, q.area.y), None);
        assert_eq!(hit_test(&hits, 0, 0), None);
    }

    #[test]
    fn narrow_area_drops_keys_instead_of_overflowing() {
        let hits = layout_keys(Rect::new(0, 0, 20, KEY_HEIGHT));
        assert!(hits.iter().all(|h| h.area.x + h.area.width <= 20));
        assert!(hits.iter().all(|h| h.area.y == 0));
    }
}
