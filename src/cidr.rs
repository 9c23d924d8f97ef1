//! CIDR descriptors and the subset/overlap checks used by the
//! infrastructure validator.
//!
//! A [`Cidr`] couples a raw address-block string with the field path used
//! for error attribution. The parsed network is only exposed once the
//! string has passed both the parse and canonical-form checks; entries
//! that fail either check drop out of subsequent subset/overlap
//! computations.

use ipnet::IpNet;

use crate::field::{ErrorList, FieldError, Path};

#[derive(Clone, Debug)]
pub struct Cidr {
    raw: String,
    path: Path,
    net: Option<IpNet>,
    parse_error: Option<String>,
}

impl Cidr {
    pub fn new(raw: impl Into<String>, path: Path) -> Self {
        let raw = raw.into();
        match raw.parse::<IpNet>() {
            Ok(net) => {
                // Canonical means re-serializing the masked network
                // reproduces the input exactly.
                let canonical = net.trunc().to_string() == raw;
                Cidr {
                    net: canonical.then(|| net.trunc()),
                    parse_error: None,
                    raw,
                    path,
                }
            }
            Err(e) => Cidr {
                net: None,
                parse_error: Some(e.to_string()),
                raw,
                path,
            },
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed network, available only for canonical, parseable input.
    pub fn net(&self) -> Option<&IpNet> {
        self.net.as_ref()
    }

    /// One Invalid error if the raw string does not parse at all.
    pub fn validate_parse(&self) -> ErrorList {
        match &self.parse_error {
            Some(detail) => vec![FieldError::invalid(self.path.clone(), &self.raw, detail)],
            None => Vec::new(),
        }
    }

    /// Assert every entry belongs inside this block: the entry's network
    /// address must lie within it. Violations are attributed to the
    /// entry's own path, naming this block.
    pub fn validate_subset<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a Cidr>,
    ) -> ErrorList {
        let mut errs = ErrorList::new();
        let Some(net) = self.net else {
            return errs;
        };
        for entry in entries {
            let Some(other) = entry.net else { continue };
            if !net.contains(&other.network()) {
                errs.push(FieldError::invalid(
                    entry.path.clone(),
                    &entry.raw,
                    format!("must be a subset of \"{}\" (\"{}\")", self.path, self.raw),
                ));
            }
        }
        errs
    }

    /// Assert every entry's network address lies within this block.
    /// Violations are attributed to this block's path, naming the
    /// uncovered entry.
    pub fn validate_covers<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a Cidr>,
    ) -> ErrorList {
        let mut errs = ErrorList::new();
        let Some(net) = self.net else {
            return errs;
        };
        for entry in entries {
            let Some(other) = entry.net else { continue };
            if !net.contains(&other.network()) {
                errs.push(FieldError::invalid(
                    self.path.clone(),
                    &self.raw,
                    format!("must be a superset of \"{}\" (\"{}\")", entry.path, entry.raw),
                ));
            }
        }
        errs
    }

    /// Assert this block shares no addresses with any entry. Violations
    /// are attributed to this block's path.
    pub fn validate_disjoint<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a Cidr>,
    ) -> ErrorList {
        let mut errs = ErrorList::new();
        let Some(net) = self.net else {
            return errs;
        };
        for entry in entries {
            let Some(other) = entry.net else { continue };
            if overlaps(&net, &other) {
                errs.push(FieldError::invalid(
                    self.path.clone(),
                    &self.raw,
                    format!(
                        "must not overlap with \"{}\" (\"{}\")",
                        entry.path, entry.raw
                    ),
                ));
            }
        }
        errs
    }
}

/// CIDR blocks are nested or disjoint, so intersection reduces to
/// containment in either direction.
fn overlaps(a: &IpNet, b: &IpNet) -> bool {
    a.contains(b) || b.contains(a)
}

/// One Invalid error when `value` is unparseable (with the parse detail)
/// or parseable but not in canonical form.
pub fn validate_canonical(path: &Path, value: &str) -> ErrorList {
    match value.parse::<IpNet>() {
        Err(e) => vec![FieldError::invalid(path.clone(), value, e.to_string())],
        Ok(net) if net.trunc().to_string() != value => vec![FieldError::invalid(
            path.clone(),
            value,
            "must be valid canonical CIDR",
        )],
        Ok(_) => Vec::new(),
    }
}

/// Parse errors for every entry, in entry order.
pub fn validate_parse_all(cidrs: &[Cidr]) -> ErrorList {
    cidrs.iter().flat_map(Cidr::validate_parse).collect()
}

/// Pairwise overlap sweep over every unordered pair of distinct entries.
/// Each intersecting pair yields exactly one Invalid error, attributed to
/// the later entry.
pub fn validate_no_overlap(cidrs: &[Cidr]) -> ErrorList {
    let mut errs = ErrorList::new();
    for (i, left) in cidrs.iter().enumerate() {
        let Some(left_net) = left.net else { continue };
        for right in &cidrs[i + 1..] {
            let Some(right_net) = right.net else { continue };
            if overlaps(&left_net, &right_net) {
                errs.push(FieldError::invalid(
                    right.path.clone(),
                    &right.raw,
                    format!("must not overlap with \"{}\" (\"{}\")", left.path, left.raw),
                ));
            }
        }
    }
    errs
}

/// Overlap check between one ambient block (pod or service range) and
/// every entry; errors are attributed to the entry's path.
pub fn validate_disjoint_from(ambient: &Cidr, cidrs: &[Cidr]) -> ErrorList {
    let mut errs = ErrorList::new();
    let Some(ambient_net) = ambient.net else {
        return errs;
    };
    for entry in cidrs {
        let Some(net) = entry.net else { continue };
        if overlaps(&ambient_net, &net) {
            errs.push(FieldError::invalid(
                entry.path.clone(),
                &entry.raw,
                format!(
                    "must not overlap with \"{}\" (\"{}\")",
                    ambient.path, ambient.raw
                ),
            ));
        }
    }
    errs
}
