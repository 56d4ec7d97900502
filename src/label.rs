//! Dependency and semantic label matching
//!
//! Every label-filtered query takes a [`LabelFilter`]: an exact label, a set
//! of labels, or a regex searched anywhere in the label.

use regex::Regex;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy)]
pub enum LabelFilter<'a> {
    Exact(&'a str),
    AnyOf(&'a [&'a str]),
    Set(&'a FxHashSet<String>),
    Pattern(&'a Regex),
}

impl<'a> LabelFilter<'a> {
    /// Does `label` pass the filter? An absent label never does.
    pub fn matches(&self, label: Option<&str>) -> bool {
        let Some(label) = label else {
            return false;
        };

        match self {
            LabelFilter::Exact(l) => *l == label,
            LabelFilter::AnyOf(ls) => ls.iter().any(|l| *l == label),
            LabelFilter::Set(set) => set.contains(label),
            LabelFilter::Pattern(re) => re.is_match(label),
        }
    }
}

impl<'a> From<&'a str> for LabelFilter<'a> {
    fn from(label: &'a str) -> Self {
        LabelFilter::Exact(label)
    }
}

impl<'a> From<&'a Regex> for LabelFilter<'a> {
    fn from(re: &'a Regex) -> Self {
        LabelFilter::Pattern(re)
    }
}

impl<'a> From<&'a FxHashSet<String>> for LabelFilter<'a> {
    fn from(set: &'a FxHashSet<String>) -> Self {
        LabelFilter::Set(set)
    }
}

impl<'a> From<&'a [&'a str]> for LabelFilter<'a> {
    fn from(labels: &'a [&'a str]) -> Self {
        LabelFilter::AnyOf(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters() {
        assert!(LabelFilter::from("nsubj").matches(Some("nsubj")));
        assert!(!LabelFilter::from("nsubj").matches(Some("nsubjpass")));
        assert!(!LabelFilter::from("nsubj").matches(None));

        let re = Regex::new("^nsubj").unwrap();
        assert!(LabelFilter::from(&re).matches(Some("nsubjpass")));
        assert!(!LabelFilter::from(&re).matches(Some("csubj")));

        let labels: &[&str] = &["dobj", "iobj"];
        assert!(LabelFilter::from(labels).matches(Some("iobj")));

        let set: FxHashSet<String> = ["ARG0".to_string()].into_iter().collect();
        assert!(LabelFilter::from(&set).matches(Some("ARG0")));
        assert!(!LabelFilter::from(&set).matches(Some("ARG1")));
    }
}
