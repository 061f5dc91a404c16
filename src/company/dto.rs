use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::{
    validate_email_or_empty, validate_phone_fr, validate_postal_code_fr, validate_siret,
    validate_siret_or_empty, validate_url_or_empty,
};
use crate::validation::{blank_to_none, trim_in_place, Schema};

/// Company (entreprise) as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub siret: Option<String>,
    pub category_id: Uuid,
    #[serde(default)]
    pub sub_category_id: Option<Uuid>,
    pub description: String,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
}

/// Company creation form, also the editable copy of an existing company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompanyForm {
    #[validate(length(min = 2, max = 100, message = "Le nom doit contenir entre 2 et 100 caractères"))]
    pub name: String,
    #[validate(length(min = 5, max = 255, message = "L'adresse doit contenir entre 5 et 255 caractères"))]
    pub address: String,
    #[validate(custom(function = "validate_postal_code_fr"))]
    pub postal_code: String,
    #[validate(length(min = 2, max = 100, message = "La ville doit contenir entre 2 et 100 caractères"))]
    pub city: String,
    #[validate(custom(function = "validate_phone_fr"))]
    pub phone: String,
    #[validate(custom(function = "validate_email_or_empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(custom(function = "validate_url_or_empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[validate(custom(function = "validate_siret"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<Uuid>,
    #[validate(length(min = 20, max = 1000, message = "La description doit contenir entre 20 et 1000 caractères"))]
    pub description: String,
    #[validate(length(max = 500, message = "Les horaires ne doivent pas dépasser 500 caractères"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

impl Schema for CompanyForm {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.address);
        trim_in_place(&mut self.postal_code);
        trim_in_place(&mut self.city);
        trim_in_place(&mut self.phone);
        trim_in_place(&mut self.description);
        blank_to_none(&mut self.email);
        blank_to_none(&mut self.website);
        blank_to_none(&mut self.hours);
        if let Some(email) = self.email.as_mut() {
            *email = email.to_lowercase();
        }
        blank_to_none(&mut self.siret);
    }
}

impl From<&Company> for CompanyForm {
    fn from(c: &Company) -> Self {
        Self {
            name: c.name.clone(),
            address: c.address.clone(),
            postal_code: c.postal_code.clone(),
            city: c.city.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            website: c.website.clone(),
            siret: c.siret.clone(),
            category_id: c.category_id,
            sub_category_id: c.sub_category_id,
            description: c.description.clone(),
            hours: c.hours.clone(),
        }
    }
}

/// Partial update. Absent fields are left untouched by the API; an empty string
/// clears an optional text field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompanyPatch {
    #[validate(length(min = 2, max = 100, message = "Le nom doit contenir entre 2 et 100 caractères"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 5, max = 255, message = "L'adresse doit contenir entre 5 et 255 caractères"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[validate(custom(function = "validate_postal_code_fr"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[validate(length(min = 2, max = 100, message = "La ville doit contenir entre 2 et 100 caractères"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[validate(custom(function = "validate_phone_fr"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_email_or_empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(custom(function = "validate_url_or_empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[validate(custom(function = "validate_siret_or_empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// `Some(None)` is sent as `null` and clears the sub-category.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub sub_category_id: Option<Option<Uuid>>,
    #[validate(length(min = 20, max = 1000, message = "La description doit contenir entre 20 et 1000 caractères"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(length(max = 500, message = "Les horaires ne doivent pas dépasser 500 caractères"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}

impl CompanyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..self }
    }

    pub fn address(self, address: impl Into<String>) -> Self {
        Self { address: Some(address.into()), ..self }
    }

    pub fn postal_code(self, postal_code: impl Into<String>) -> Self {
        Self { postal_code: Some(postal_code.into()), ..self }
    }

    pub fn city(self, city: impl Into<String>) -> Self {
        Self { city: Some(city.into()), ..self }
    }

    pub fn phone(self, phone: impl Into<String>) -> Self {
        Self { phone: Some(phone.into()), ..self }
    }

    pub fn email(self, email: impl Into<String>) -> Self {
        Self { email: Some(email.into()), ..self }
    }

    pub fn website(self, website: impl Into<String>) -> Self {
        Self { website: Some(website.into()), ..self }
    }

    pub fn siret(self, siret: impl Into<String>) -> Self {
        Self { siret: Some(siret.into()), ..self }
    }

    pub fn category(self, category_id: Uuid, sub_category_id: Option<Uuid>) -> Self {
        Self {
            category_id: Some(category_id),
            sub_category_id: Some(sub_category_id),
            ..self
        }
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), ..self }
    }

    pub fn hours(self, hours: impl Into<String>) -> Self {
        Self { hours: Some(hours.into()), ..self }
    }

    /// Only the fields that differ between the stored company and its edited copy.
    pub fn diff(before: &Company, after: &CompanyForm) -> Self {
        fn changed(old: &str, new: &str) -> Option<String> {
            (old != new).then(|| new.to_string())
        }
        fn changed_opt(old: &Option<String>, new: &Option<String>) -> Option<String> {
            let old = old.as_deref().unwrap_or("");
            let new = new.as_deref().unwrap_or("");
            changed(old, new)
        }

        let category_changed = before.category_id != after.category_id
            || before.sub_category_id != after.sub_category_id;

        Self {
            name: changed(&before.name, &after.name),
            address: changed(&before.address, &after.address),
            postal_code: changed(&before.postal_code, &after.postal_code),
            city: changed(&before.city, &after.city),
            phone: changed(&before.phone, &after.phone),
            email: changed_opt(&before.email, &after.email),
            website: changed_opt(&before.website, &after.website),
            siret: changed_opt(&before.siret, &after.siret),
            category_id: category_changed.then_some(after.category_id),
            sub_category_id: category_changed.then_some(after.sub_category_id),
            description: changed(&before.description, &after.description),
            hours: changed_opt(&before.hours, &after.hours),
        }
    }
}

impl Schema for CompanyPatch {
    fn sanitize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.address,
            &mut self.postal_code,
            &mut self.city,
            &mut self.phone,
            &mut self.email,
            &mut self.website,
            &mut self.siret,
            &mut self.description,
            &mut self.hours,
        ] {
            if let Some(v) = field.as_mut() {
                trim_in_place(v);
            }
        }
        if let Some(email) = self.email.as_mut() {
            *email = email.to_lowercase();
        }
    }
}
