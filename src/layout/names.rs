//! Member name rules
//!
//! Dua konvensi akses: value access (tanpa prefix, `name`) dan member
//! access (`$name`). Dua nama bentrok jika sama persis atau hanya berbeda
//! satu prefix `$`.

/// Prefix untuk member access convention
pub const MEMBER_PREFIX: char = '$';

/// Nama operasi struct yang tidak boleh dipakai sebagai nama member
pub const RESERVED_NAMES: [&str; 10] = [
    "members",
    "has_member",
    "add_member",
    "remove_member",
    "insert_member",
    "offset_of",
    "size",
    "bytes",
    "value",
    "persist",
];

/// Hasil validasi nama member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    Ok,
    Duplicate,
    Reserved,
}

#[inline]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Normalized name comparison
#[inline]
pub fn names_collide(a: &str, b: &str) -> bool {
    a == b || a.strip_prefix(MEMBER_PREFIX) == Some(b) || b.strip_prefix(MEMBER_PREFIX) == Some(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_rules() {
        assert!(names_collide("width", "width"));
        assert!(names_collide("$width", "width"));
        assert!(names_collide("width", "$width"));
        assert!(!names_collide("width", "height"));
        assert!(!names_collide("$$width", "width"));
        assert!(names_collide("$$width", "$width"));
    }

    #[test]
    fn test_reserved() {
        for name in RESERVED_NAMES {
            assert!(is_reserved(name));
        }
        assert!(!is_reserved("width"));
        assert!(!is_reserved("$size"));
    }
}
