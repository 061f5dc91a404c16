use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::rules::validate_password_strength;
use crate::validation::{trim_in_place, FieldErrors, Schema};

/// Account settings form. The password change part is optional as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountUpdateForm {
    #[validate(length(min = 2, max = 50, message = "Le prénom doit contenir entre 2 et 50 caractères"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Le nom doit contenir entre 2 et 50 caractères"))]
    pub last_name: String,
    #[validate(
        length(min = 1, message = "L'email est requis"),
        email(message = "Adresse email invalide")
    )]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(default, skip_serializing)]
    pub confirm_new_password: Option<String>,
}

impl AccountUpdateForm {
    pub fn changes_password(&self) -> bool {
        self.new_password.is_some()
    }
}

impl Schema for AccountUpdateForm {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.last_name);
        self.email = self.email.trim().to_lowercase();
        // passwords are not trimmed; only fully empty inputs count as absent
        for field in [
            &mut self.current_password,
            &mut self.new_password,
            &mut self.confirm_new_password,
        ] {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
    }

    fn check(&self, errors: &mut FieldErrors) {
        if self.new_password.is_some() && self.current_password.is_none() {
            errors.push(
                "current_password",
                "Le mot de passe actuel est requis pour le modifier",
            );
        }
        if self.new_password.is_some() && self.confirm_new_password != self.new_password {
            errors.push(
                "confirm_new_password",
                "Les mots de passe ne correspondent pas",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AccountUpdateForm {
        AccountUpdateForm {
            first_name: " Marie ".into(),
            last_name: "Curie".into(),
            email: "Marie@Example.fr".into(),
            current_password: None,
            new_password: None,
            confirm_new_password: None,
        }
    }

    #[test]
    fn test_profile_only_update() {
        let parsed = form().parse().expect("valid");
        assert_eq!(parsed.first_name, "Marie");
        assert_eq!(parsed.email, "marie@example.fr");
        assert!(!parsed.changes_password());
    }

    #[test]
    fn test_empty_password_inputs_are_absent() {
        let mut f = form();
        f.current_password = Some(String::new());
        f.new_password = Some(String::new());
        f.confirm_new_password = Some(String::new());
        assert!(f.parse().is_ok());
    }

    #[test]
    fn test_password_change_needs_current_password() {
        let mut f = form();
        f.new_password = Some("N3wPassword".into());
        f.confirm_new_password = Some("N3wPassword".into());
        assert_eq!(f.parse().unwrap_err().fields(), vec!["current_password"]);
    }

    #[test]
    fn test_password_change_confirmation() {
        let mut f = form();
        f.current_password = Some("old".into());
        f.new_password = Some("N3wPassword".into());
        f.confirm_new_password = Some("N3wPasswordd".into());
        assert_eq!(f.parse().unwrap_err().fields(), vec!["confirm_new_password"]);

        let mut f = form();
        f.current_password = Some("old".into());
        f.new_password = Some("N3wPassword".into());
        f.confirm_new_password = Some("N3wPassword".into());
        assert!(f.parse().unwrap().changes_password());
    }

    #[test]
    fn test_missing_confirmation_rejected() {
        let mut f = form();
        f.current_password = Some("old".into());
        f.new_password = Some("N3wPassword".into());
        let errors = f.parse().unwrap_err();
        assert_eq!(errors.fields(), vec!["confirm_new_password"]);
        assert_eq!(
            errors.messages_for("confirm_new_password").collect::<Vec<_>>(),
            vec!["Les mots de passe ne correspondent pas"]
        );
    }

    #[test]
    fn test_confirmation_not_serialized() {
        let mut f = form();
        f.confirm_new_password = Some("x".into());
        let json = serde_json::to_value(&f).unwrap();
        assert!(json.get("confirm_new_password").is_none());
        assert!(json.get("new_password").is_none());
    }
}
