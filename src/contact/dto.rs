use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{trim_in_place, Schema};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, max = 100, message = "Le nom doit contenir entre 2 et 100 caractères"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "L'email est requis"),
        email(message = "Adresse email invalide")
    )]
    pub email: String,
    #[validate(length(min = 3, max = 150, message = "Le sujet doit contenir entre 3 et 150 caractères"))]
    pub subject: String,
    #[validate(length(min = 10, max = 2000, message = "Le message doit contenir entre 10 et 2000 caractères"))]
    pub message: String,
}

impl Schema for ContactForm {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.name);
        self.email = self.email.trim().to_lowercase();
        trim_in_place(&mut self.subject);
        trim_in_place(&mut self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_rules() {
        let form = ContactForm {
            name: "Lucie".into(),
            email: "lucie@example.fr".into(),
            subject: "Tarifs".into(),
            message: "Bonjour, quels sont vos tarifs ?".into(),
        };
        assert!(form.clone().parse().is_ok());

        let bad = ContactForm {
            name: "L".into(),
            email: "lucie".into(),
            subject: "  ".into(),
            message: "Court".into(),
        };
        assert_eq!(
            bad.parse().unwrap_err().fields(),
            vec!["email", "message", "name", "subject"]
        );
    }
}
