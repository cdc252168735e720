//! Field-order resolution for Fixed-Field-Containers.
//!
//! Every field carries an optional tag: no tag (or an empty one) keeps the
//! declared position, `"-"` drops the field from the wire, and decimal text
//! moves the field to that ordinal. The ordinals claimed by participating
//! fields must be distinct, below the field count, and form the contiguous
//! range `0..k`. Unclaimed ordinals above `k` are fine; they are left behind
//! by excluded fields.

use crate::error::OrdinalError;

pub const EXCLUDED: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    Excluded,
    At(usize),
}

/// Resolves the ordinal of the field declared at `position`.
pub fn parse_tag(
    field: &'static str,
    tag: Option<&str>,
    position: usize,
) -> Result<Ordinal, OrdinalError> {
    let tag = match tag {
        None | Some("") => return Ok(Ordinal::At(position)),
        Some(EXCLUDED) => return Ok(Ordinal::Excluded),
        Some(tag) => tag,
    };

    let malformed = || OrdinalError::Malformed {
        field,
        tag: tag.to_string(),
    };
    // `usize::from_str` accepts a leading `+`; tags must be plain digits.
    if !tag.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    tag.parse::<usize>().map(Ordinal::At).map_err(|_| malformed())
}

/// Computes the wire visit order of a container.
///
/// `fields` yields `(name, tag)` in declaration order. The result holds the
/// declared positions of the participating fields, ordinal 0 first.
pub fn resolve<'t, I>(fields: I) -> Result<Vec<usize>, OrdinalError>
where
    I: IntoIterator<Item = (&'static str, Option<&'t str>)>,
    I::IntoIter: ExactSizeIterator,
{
    let fields = fields.into_iter();
    let len = fields.len();
    let mut slots: Vec<Option<usize>> = vec![None; len];
    let mut claimed = 0;

    for (position, (name, tag)) in fields.enumerate() {
        let ordinal = match parse_tag(name, tag, position)? {
            Ordinal::Excluded => continue,
            Ordinal::At(ordinal) => ordinal,
        };
        if ordinal >= len {
            return Err(OrdinalError::OutOfRange {
                field: name,
                ordinal,
                fields: len,
            });
        }
        if slots[ordinal].is_some() {
            return Err(OrdinalError::Duplicate {
                field: name,
                ordinal,
            });
        }
        slots[ordinal] = Some(position);
        claimed += 1;
    }

    let mut order = Vec::with_capacity(claimed);
    for (ordinal, slot) in slots.into_iter().take(claimed).enumerate() {
        match slot {
            Some(position) => order.push(position),
            None => {
                return Err(OrdinalError::Gapped {
                    missing: ordinal,
                    claimed,
                })
            }
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tags: &[Option<&'static str>]) -> Vec<(&'static str, Option<&'static str>)> {
        const NAMES: [&str; 4] = ["a", "b", "c", "d"];
        tags.iter().enumerate().map(|(i, tag)| (NAMES[i], *tag)).collect()
    }

    #[test]
    fn test_default_order() {
        assert_eq!(resolve(tags(&[None, None, None])).unwrap(), vec![0, 1, 2]);
        assert_eq!(resolve(tags(&[Some(""), None])).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_reversed_order() {
        let order = resolve(tags(&[Some("2"), Some("1"), Some("0")])).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_partial_tags_mix_with_positions() {
        // `b` keeps position 1, `a` and `c` swap.
        let order = resolve(tags(&[Some("2"), None, Some("0")])).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_excluded_fields() {
        assert_eq!(
            resolve(tags(&[None, Some("-"), None])).unwrap_err(),
            OrdinalError::Gapped {
                missing: 1,
                claimed: 2
            }
        );
        assert_eq!(resolve(tags(&[None, None, Some("-")])).unwrap(), vec![0, 1]);
        assert_eq!(
            resolve(tags(&[Some("1"), Some("-"), Some("0")])).unwrap(),
            vec![2, 0]
        );
        assert!(resolve(tags(&[Some("-"), Some("-")])).unwrap().is_empty());
    }

    #[test]
    fn test_gapped_ordinals() {
        let err = resolve(tags(&[Some("2"), Some("-"), Some("0")])).unwrap_err();
        assert_eq!(err, OrdinalError::Gapped {
            missing: 1,
            claimed: 2
        });
    }

    #[test]
    fn test_duplicate_ordinal() {
        let err = resolve(tags(&[Some("1"), Some("1"), Some("0")])).unwrap_err();
        assert_eq!(err, OrdinalError::Duplicate {
            field: "b",
            ordinal: 1
        });
    }

    #[test]
    fn test_out_of_range() {
        let err = resolve(tags(&[Some("3"), None, None])).unwrap_err();
        assert_eq!(err, OrdinalError::OutOfRange {
            field: "a",
            ordinal: 3,
            fields: 3
        });
    }

    #[test]
    fn test_malformed_tags() {
        for tag in ["ko", "+1", "-1", "1.0", " 1", "99999999999999999999999"] {
            let err = resolve(tags(&[Some(tag)])).unwrap_err();
            assert!(
                matches!(err, OrdinalError::Malformed { field: "a", .. }),
                "tag {tag:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_container() {
        let fields: Vec<(&'static str, Option<&str>)> = Vec::new();
        assert!(resolve(fields).unwrap().is_empty());
    }
}
