use crate::metrics::dcg::Numerator;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    pub depth: Option<usize>,
    pub numerator: Numerator,
    pub normalize: bool,
    pub standardize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileName {
    Default,
    Rel30,
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            depth: Some(25),
            numerator: Numerator::Exp,
            normalize: true,
            standardize: true,
        }
    }

    pub fn rel30_v1() -> Self {
        let mut base = Self::default_v1();
        base.depth = Some(30);
        base.numerator = Numerator::Rel;
        base.standardize = false;
        base
    }

    pub fn named(name: ProfileName) -> Self {
        match name {
            ProfileName::Default => Self::default_v1(),
            ProfileName::Rel30 => Self::rel30_v1(),
        }
    }

    /// Depth 0 is treated as unset.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = (depth > 0).then_some(depth);
        self
    }

    pub fn label(&self) -> String {
        let depth = match self.depth {
            Some(k) => k.to_string(),
            None => "all".to_string(),
        };
        format!(
            "depth={}, numerator={}, normalize={}, standardize={}",
            depth,
            self.numerator.as_str(),
            self.normalize,
            self.standardize
        )
    }
}
