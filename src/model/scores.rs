use std::fmt;

/// Raw class scores exactly as the model produced them.
///
/// Length and ordering belong to the model; no softmax or label lookup is
/// applied here.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        ScoreVector(scores)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Comma-separated, full precision.
impl fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}
