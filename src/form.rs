//! Search form state and validation.

/// Validation failures for the city field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("City is required")]
    Required,
    #[error("City should not contain numbers!!")]
    Format,
}

/// Lifecycle of the city field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Pristine,
    Touched,
    Valid,
    Invalid(ValidationError),
    Submitting,
    Succeeded,
    Failed,
}

/// Checks the raw field value. Only ASCII letters, whitespace and comma
/// separators are accepted.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == ',')
    {
        return Err(ValidationError::Format);
    }
    Ok(())
}

/// Splits on commas, trims each piece and drops the empty ones.
pub fn split_cities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The single-field search form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    value: String,
    touched: bool,
    phase: FormPhase,
}

impl SearchForm {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Error to show beside the field: only once touched and while invalid.
    pub fn visible_error(&self) -> Option<ValidationError> {
        if !self.touched {
            return None;
        }
        match self.phase {
            FormPhase::Invalid(err) => Some(err),
            _ => None,
        }
    }

    pub fn update_field(self, raw: impl Into<String>) -> Self {
        let value = raw.into();
        let phase = if self.touched {
            Self::checked_phase(&value)
        } else {
            FormPhase::Touched
        };
        Self {
            value,
            touched: self.touched,
            phase,
        }
    }

    pub fn blur(self) -> Self {
        if self.is_submitting() {
            return self;
        }
        let phase = Self::checked_phase(&self.value);
        Self {
            touched: true,
            phase,
            ..self
        }
    }

    /// Moves to `Submitting` and yields the city names, or records the
    /// validation failure.
    pub fn submit(self) -> (Self, Result<Vec<String>, ValidationError>) {
        let checked = validate(&self.value).and_then(|_| {
            let cities = split_cities(&self.value);
            if cities.is_empty() {
                Err(ValidationError::Required)
            } else {
                Ok(cities)
            }
        });

        let phase = match &checked {
            Ok(_) => FormPhase::Submitting,
            Err(err) => FormPhase::Invalid(*err),
        };

        (
            Self {
                value: self.value,
                touched: true,
                phase,
            },
            checked,
        )
    }

    /// Success resets the field, failure keeps what the user typed. A
    /// failure arriving after further edits keeps the edited text checked.
    pub fn finish_submit(self, succeeded: bool) -> Self {
        if succeeded {
            return Self {
                value: String::new(),
                touched: false,
                phase: FormPhase::Succeeded,
            };
        }
        let phase = if self.is_submitting() {
            FormPhase::Failed
        } else if self.touched {
            Self::checked_phase(&self.value)
        } else {
            self.phase
        };
        Self { phase, ..self }
    }

    fn checked_phase(value: &str) -> FormPhase {
        match validate(value) {
            Ok(()) => FormPhase::Valid,
            Err(err) => FormPhase::Invalid(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate(""), Err(ValidationError::Required));
        assert_eq!(validate("   "), Err(ValidationError::Required));
        assert_eq!(validate("\t\n"), Err(ValidationError::Required));
    }

    #[test]
    fn test_validate_accepts_letters_spaces_commas() {
        for input in ["Paris", "New York", "Paris, london ,Tokyo", "Rio de Janeiro", ", ,"] {
            assert_eq!(validate(input), Ok(()), "{input:?} should be valid");
        }
    }

    #[test]
    fn test_validate_rejects_digits_and_symbols() {
        for input in [
            "Paris1", "London!", "St. Louis", "Tokyo;Osaka", "Rome-", "42", "a_b",
            "São Paulo", "Zürich,Köln", "東京", "Ελλάδα",
        ] {
            assert_eq!(validate(input), Err(ValidationError::Format), "{input:?} should fail");
        }
    }

    #[test]
    fn test_split_cities() {
        assert_eq!(
            split_cities("Paris, london ,Tokyo"),
            vec!["Paris", "london", "Tokyo"]
        );
        assert_eq!(split_cities("Paris,,  ,Rome,"), vec!["Paris", "Rome"]);
        assert!(split_cities(" , ").is_empty());
    }

    #[test]
    fn test_error_hidden_until_touched() {
        assert_eq!(SearchForm::default().phase(), FormPhase::Pristine);

        let form = SearchForm::default().update_field("Paris1");
        assert_eq!(form.phase(), FormPhase::Touched);
        assert_eq!(form.visible_error(), None);

        let form = form.blur();
        assert_eq!(form.visible_error(), Some(ValidationError::Format));

        let form = form.update_field("Paris");
        assert_eq!(form.phase(), FormPhase::Valid);
        assert_eq!(form.visible_error(), None);
    }

    #[test]
    fn test_submit_invalid_surfaces_error() {
        let (form, result) = SearchForm::default().update_field("").submit();
        assert_eq!(result, Err(ValidationError::Required));
        assert_eq!(form.visible_error(), Some(ValidationError::Required));
    }

    #[test]
    fn test_submit_only_separators_is_required() {
        let (form, result) = SearchForm::default().update_field(" , ,").submit();
        assert_eq!(result, Err(ValidationError::Required));
        assert_eq!(form.value(), " , ,");
    }

    #[test]
    fn test_submit_success_clears_field() {
        let (form, result) = SearchForm::default()
            .update_field("Paris, Rome")
            .blur()
            .submit();
        assert_eq!(result, Ok(vec!["Paris".to_string(), "Rome".to_string()]));
        assert!(form.is_submitting());

        let form = form.finish_submit(true);
        assert_eq!(form.value(), "");
        assert_eq!(form.phase(), FormPhase::Succeeded);
        assert_eq!(form.visible_error(), None);
    }

    #[test]
    fn test_submit_failure_keeps_text() {
        let (form, _) = SearchForm::default().update_field("Pariss , Rome").submit();
        let form = form.finish_submit(false);
        assert_eq!(form.value(), "Pariss , Rome");
        assert_eq!(form.phase(), FormPhase::Failed);
    }

    #[test]
    fn test_typing_after_submit_reenters_editing() {
        let (form, _) = SearchForm::default().update_field("Paris").submit();
        let form = form.finish_submit(false).update_field("Paris1");
        assert_eq!(form.phase(), FormPhase::Invalid(ValidationError::Format));

        let (form, _) = SearchForm::default().update_field("Paris").submit();
        let form = form.finish_submit(true).update_field("Rome");
        assert_eq!(form.phase(), FormPhase::Touched);
        assert_eq!(form.visible_error(), None);
    }

    #[test]
    fn test_late_failure_keeps_inline_error_for_edited_text() {
        let (form, _) = SearchForm::default().update_field("Paris").submit();
        let form = form.update_field("Paris9");
        assert_eq!(form.visible_error(), Some(ValidationError::Format));

        let form = form.finish_submit(false);
        assert_eq!(form.value(), "Paris9");
        assert_eq!(form.phase(), FormPhase::Invalid(ValidationError::Format));
        assert_eq!(form.visible_error(), Some(ValidationError::Format));
    }
}
