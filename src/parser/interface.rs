use regex::Regex;

/// Identifier references found in one interface file
#[derive(Debug, Default)]
pub struct InterfaceReferences {
    /// `class="Name"` / `customClass="Name"`
    pub classes: Vec<String>,

    /// `selector="name"` or `selector="name:"`
    pub selectors: Vec<String>,

    /// `property="name"` (outlet bindings)
    pub properties: Vec<String>,
}

/// Scans interface-definition files (xib, storyboard, nib) for the three
/// attribute patterns that bind back into source declarations.
///
/// Pattern scanning rather than XML parsing: these files must be survivable
/// even when malformed, and only three attribute shapes matter.
pub struct InterfaceScanner {
    class_attr: Regex,
    selector_attr: Regex,
    property_attr: Regex,
}

impl InterfaceScanner {
    pub fn new() -> Self {
        Self {
            class_attr: Regex::new(r#"\b(?:customClass|class)="(\w+)""#).unwrap(),
            selector_attr: Regex::new(r#"\bselector="(\w+):?""#).unwrap(),
            property_attr: Regex::new(r#"\bproperty="(\w+)""#).unwrap(),
        }
    }

    /// Collapse the file to a single search string and collect every match
    /// of each attribute pattern.
    pub fn scan(&self, contents: &str) -> InterfaceReferences {
        let flattened = contents.split('\n').collect::<Vec<_>>().join(" ");

        let collect = |regex: &Regex| {
            regex
                .captures_iter(&flattened)
                .map(|captures| captures[1].to_string())
                .collect()
        };

        InterfaceReferences {
            classes: collect(&self.class_attr),
            selectors: collect(&self.selector_attr),
            properties: collect(&self.property_attr),
        }
    }
}

impl Default for InterfaceScanner {
    fn default() -> Self {
        Self::new()
    }
}
