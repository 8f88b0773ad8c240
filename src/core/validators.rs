use thiserror::Error;

/// Field rules. Declared order is irrelevant; errors are always reported in
/// `Required`, `MinLength`, `MaxLength` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field is required")]
    Required,

    #[error("Minimum length is {required} characters")]
    MinLength { required: usize, actual: usize },

    #[error("Maximum length of {required} characters exceeded")]
    MaxLength { required: usize, actual: usize },

    /// Invalid for a reason none of the above describes, e.g. a collection
    /// with invalid children.
    #[error("Invalid field")]
    Invalid,
}

impl ValidationError {
    fn precedence(&self) -> u8 {
        match self {
            ValidationError::Required => 0,
            ValidationError::MinLength { .. } => 1,
            ValidationError::MaxLength { .. } => 2,
            ValidationError::Invalid => 3,
        }
    }
}

impl Validator {
    pub fn check(&self, value: &str) -> Option<ValidationError> {
        let actual = value.chars().count();
        match *self {
            Validator::Required if value.is_empty() => Some(ValidationError::Required),
            // Empty values are left to `Required`.
            Validator::MinLength(required) if actual > 0 && actual < required => {
                Some(ValidationError::MinLength { required, actual })
            }
            Validator::MaxLength(required) if actual > required => {
                Some(ValidationError::MaxLength { required, actual })
            }
            _ => None,
        }
    }
}

/// Runs every validator and returns the violations in precedence order.
pub fn run_validators(validators: &[Validator], value: &str) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = validators.iter().filter_map(|v| v.check(value)).collect();
    errors.sort_by_key(ValidationError::precedence);
    errors
}

pub const COURSE_NAME: &[Validator] = &[
    Validator::Required,
    Validator::MinLength(5),
    Validator::MaxLength(100),
];

pub const COURSE_CATEGORY: &[Validator] = &[Validator::Required];

pub const LESSON_NAME: &[Validator] = &[
    Validator::Required,
    Validator::MinLength(5),
    Validator::MaxLength(100),
];

/// Video ids are a fixed-width identifier, not a full URL.
pub const LESSON_VIDEO: &[Validator] = &[
    Validator::Required,
    Validator::MinLength(10),
    Validator::MaxLength(11),
];
