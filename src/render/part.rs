//! Part tree nodes.

use serde::{Deserialize, Deserializer, Serialize};

/// A node of a composition tree.
///
/// `name` references a registered component. `template` picks one of the
/// component's templates; when absent the component's default is used.
/// Children render first and their output becomes data for this part.
///
/// Deserializes from configuration; `components` is accepted as an alias for
/// `children`, and an empty `template` counts as absent.
///
/// ```rust
/// use pageparts::render::Part;
///
/// let part: Part = serde_yaml::from_str(
///     "name: list\ntemplate: ''\nchildren:\n  - name: item\n",
/// ).unwrap();
/// assert_eq!(part.template(), None);
/// assert_eq!(part.children[0].name, "item");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Part {
    pub name: String,

    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub template: Option<String>,

    #[serde(default, alias = "components", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Part>,
}

impl Part {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Part) -> Self {
        self.children.push(child);
        self
    }

    /// The requested template, treating a blank name as unset.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Part::depth).max().unwrap_or(0)
    }

    /// Visit this part and every descendant, depth-first in declared order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Part, &[&'a str])) {
        fn go<'a>(
            part: &'a Part,
            path: &mut Vec<&'a str>,
            visit: &mut impl FnMut(&'a Part, &[&'a str]),
        ) {
            visit(part, path.as_slice());
            path.push(&part.name);
            for child in &part.children {
                go(child, path, visit);
            }
            path.pop();
        }
        go(self, &mut Vec::new(), visit);
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
