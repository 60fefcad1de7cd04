//! Framework assembly classification
//!
//! Separates platform assemblies (BCL, Mono, Xamarin, common Microsoft
//! packages) from the application's own code.

use regex::Regex;

use crate::AssemblyDescriptor;

/// Name prefixes of platform and framework assemblies
///
/// `.*_Microsoft` catches satellite and renamed Microsoft assemblies that
/// carry the vendor after an underscore.
///
/// The dots are regex wildcards, so `Systems.dll` and `Mono_Android.dll`
/// count as framework too.
pub const FRAMEWORK_PATTERNS: &[&str] = &[
    "System.",
    "Mono.",
    ".*_Microsoft",
    "Microsoft",
    "Xamarin",
    "mscorlib",
    "Newtonsoft",
    "Java.Interop",
];

/// Matches assembly names against framework prefixes, anchored at the start
#[derive(Debug, Clone)]
pub struct FrameworkFilter {
    regex: Regex,
}

impl FrameworkFilter {
    /// Build a filter from the built-in patterns plus extra regex prefixes
    pub fn with_patterns<S: AsRef<str>>(extra: &[S]) -> Result<Self, regex::Error> {
        let alternation = FRAMEWORK_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            regex: Regex::new(&format!("^(?:{})", alternation))?,
        })
    }

    /// True when `name` belongs to the platform or a known framework
    pub fn is_framework(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Keep only third-party (application) assemblies
    pub fn third_party<'a, I>(&self, assemblies: I) -> Vec<AssemblyDescriptor>
    where
        I: IntoIterator<Item = &'a AssemblyDescriptor>,
    {
        assemblies
            .into_iter()
            .filter(|asm| !self.is_framework(&asm.name))
            .cloned()
            .collect()
    }
}

impl Default for FrameworkFilter {
    fn default() -> Self {
        let extra: &[&str] = &[];
        // Built-in patterns are constant and known to compile
        Self::with_patterns(extra).unwrap_or_else(|e| unreachable!("framework patterns: {e}"))
    }
}
