//! Keyword/type heuristic that maps a lead onto a discovered pipe schema.
//!
//! Each semantic slot picks the first discovered field whose lowercased label
//! contains one of the slot's keywords and whose type accepts free text.
//! A field bound to one slot is never bound to another.

use std::collections::HashSet;

use crate::types::{FieldMapping, FieldType, LeadSubmission, RecordCreationRequest, RemoteFieldDescriptor};

/// Semantic slots of a lead, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Company,
    Email,
    Phone,
    Description,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Company, Slot::Email, Slot::Phone, Slot::Description];

    /// Lowercase label fragments that identify this slot.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Slot::Company => &["empresa", "company", "nome da empresa", "organização"],
            Slot::Email => &["email", "e-mail", "correio eletrônico"],
            Slot::Phone => &["telefone", "celular", "whatsapp", "phone", "contato"],
            Slot::Description => &[
                "desafio",
                "obs",
                "notas",
                "detalhes",
                "challenge",
                "descrição",
                "sobre",
            ],
        }
    }
}

/// Build the human-readable block carrying every submitted value.
///
/// Values are inserted verbatim so nothing the visitor typed is lost,
/// whatever the schema match turned out to be.
pub fn compose_description(lead: &LeadSubmission) -> String {
    format!(
        "Empresa: {}\nEmail: {}\nWhatsApp/Tel: {}\nDesafio: {}",
        lead.company, lead.email, lead.phone, lead.challenge
    )
}

/// Map the lead onto the discovered fields.
///
/// Slots whose value is empty are skipped; the description slot always
/// carries [`compose_description`].
pub fn map_fields(lead: &LeadSubmission, fields: &[RemoteFieldDescriptor]) -> Vec<FieldMapping> {
    let description = compose_description(lead);
    let mut used: HashSet<&str> = HashSet::new();
    let mut mappings = Vec::new();

    for slot in Slot::ALL {
        let value = match slot {
            Slot::Company => lead.company.as_str(),
            Slot::Email => lead.email.as_str(),
            Slot::Phone => lead.phone.as_str(),
            Slot::Description => description.as_str(),
        };
        if value.is_empty() {
            continue;
        }

        let Some(field) = find_field(slot, fields, &used) else {
            continue;
        };

        used.insert(field.id.as_str());
        mappings.push(FieldMapping {
            field_id: field.id.clone(),
            field_value: value.to_string(),
        });
    }

    mappings
}

/// Assemble the creation request for a lead against a discovered schema.
pub fn plan_record(lead: &LeadSubmission, fields: &[RemoteFieldDescriptor]) -> RecordCreationRequest {
    RecordCreationRequest {
        title: lead.company.clone(),
        fields: map_fields(lead, fields),
        description: compose_description(lead),
    }
}

fn find_field<'a>(
    slot: Slot,
    fields: &'a [RemoteFieldDescriptor],
    used: &HashSet<&str>,
) -> Option<&'a RemoteFieldDescriptor> {
    let mut candidates = fields
        .iter()
        .filter(|f| f.field_type.accepts_free_text() && !used.contains(f.id.as_str()));

    if slot == Slot::Description {
        // Any long-text field wins over a keyword match.
        let long_text = candidates
            .clone()
            .find(|f| f.field_type == FieldType::LongText);
        if long_text.is_some() {
            return long_text;
        }
    }

    candidates.find(|f| label_matches(f, slot.keywords()))
}

fn label_matches(field: &RemoteFieldDescriptor, keywords: &[&str]) -> bool {
    let Some(label) = field.label.as_deref() else {
        return false;
    };
    let label = label.to_lowercase();
    keywords.iter().any(|k| label.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> LeadSubmission {
        LeadSubmission {
            company: "Acme".into(),
            email: "a@acme.com".into(),
            phone: String::new(),
            challenge: String::new(),
        }
    }

    fn full_lead() -> LeadSubmission {
        LeadSubmission {
            company: "Café \"Tokyo\" Ltda".into(),
            email: "ceo@cafe.com.br".into(),
            phone: "(11) 98765-4321".into(),
            challenge: "Reposicionar a marca\nem 2025".into(),
        }
    }

    #[test]
    fn exact_company_and_email_match() {
        let fields = vec![
            RemoteFieldDescriptor::new("f1", "Nome da Empresa", "short_text"),
            RemoteFieldDescriptor::new("f2", "Email", "email"),
        ];
        let plan = plan_record(&acme(), &fields);

        assert_eq!(plan.title, "Acme");
        assert_eq!(
            plan.fields,
            vec![
                FieldMapping {
                    field_id: "f1".into(),
                    field_value: "Acme".into()
                },
                FieldMapping {
                    field_id: "f2".into(),
                    field_value: "a@acme.com".into()
                },
            ]
        );
    }

    #[test]
    fn unrelated_labels_yield_no_mappings() {
        let fields = vec![
            RemoteFieldDescriptor::new("f1", "Orçamento", "short_text"),
            RemoteFieldDescriptor::new("f2", "Prazo", "date"),
        ];
        let plan = plan_record(&acme(), &fields);
        assert!(plan.fields.is_empty());
        assert_eq!(plan.title, "Acme");
    }

    #[test]
    fn empty_schema_still_titles_by_company() {
        let plan = plan_record(&acme(), &[]);
        assert!(plan.fields.is_empty());
        assert_eq!(plan.title, "Acme");
        assert!(!plan.title.is_empty());
    }

    #[test]
    fn unsafe_types_are_never_targeted() {
        let fields = vec![
            RemoteFieldDescriptor::new("sel", "Empresa", "select"),
            RemoteFieldDescriptor::new("conn", "Email do contato", "connector"),
            RemoteFieldDescriptor::new("num", "Telefone", "number"),
            RemoteFieldDescriptor::new("date", "Detalhes", "date"),
            RemoteFieldDescriptor::new("ok", "Company", "short_text"),
        ];
        let mappings = map_fields(&full_lead(), &fields);

        let ids: Vec<&str> = mappings.iter().map(|m| m.field_id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
        for m in &mappings {
            let field = fields.iter().find(|f| f.id == m.field_id).unwrap();
            assert!(field.field_type.accepts_free_text());
        }
    }

    #[test]
    fn field_ids_are_never_reused() {
        // One field whose label matches every slot.
        let fields = vec![RemoteFieldDescriptor::new(
            "all",
            "Empresa / Email / Telefone / Detalhes",
            "long_text",
        )];
        let mappings = map_fields(&full_lead(), &fields);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].field_id, "all");
        assert_eq!(mappings[0].field_value, full_lead().company);

        let fields = vec![
            RemoteFieldDescriptor::new("a", "Contato da empresa", "short_text"),
            RemoteFieldDescriptor::new("b", "E-mail de contato", "email"),
            RemoteFieldDescriptor::new("c", "WhatsApp", "phone"),
            RemoteFieldDescriptor::new("d", "Sobre o projeto", "short_text"),
        ];
        let mappings = map_fields(&full_lead(), &fields);
        let mut ids: Vec<&str> = mappings.iter().map(|m| m.field_id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 4);
    }

    #[test]
    fn first_match_wins() {
        let fields = vec![
            RemoteFieldDescriptor::new("first", "Empresa", "short_text"),
            RemoteFieldDescriptor::new("second", "Nome da Empresa", "short_text"),
        ];
        let mappings = map_fields(&acme(), &fields);
        assert_eq!(mappings[0].field_id, "first");
    }

    #[test]
    fn label_matching_ignores_case() {
        let fields = vec![
            RemoteFieldDescriptor::new("org", "ORGANIZAÇÃO", "short_text"),
            RemoteFieldDescriptor::new("mail", "E-MAIL", "email"),
            RemoteFieldDescriptor::new("tel", "Celular", "phone"),
        ];
        let mappings = map_fields(&full_lead(), &fields);
        let ids: Vec<&str> = mappings.iter().map(|m| m.field_id.as_str()).collect();
        assert_eq!(ids, vec!["org", "mail", "tel"]);
    }

    #[test]
    fn description_prefers_long_text_and_carries_full_block() {
        let fields = vec![
            RemoteFieldDescriptor::new("obs", "Observações", "short_text"),
            RemoteFieldDescriptor::new("notes", "Anything", "long_text"),
        ];
        let lead = full_lead();
        let mappings = map_fields(&lead, &fields);

        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].field_id, "notes");
        assert_eq!(mappings[0].field_value, compose_description(&lead));
    }

    #[test]
    fn description_falls_back_to_keyword() {
        let fields = vec![RemoteFieldDescriptor::new("obs", "Observações", "short_text")];
        let mappings = map_fields(&full_lead(), &fields);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].field_id, "obs");
        assert!(mappings[0].field_value.contains("Reposicionar a marca"));
    }

    #[test]
    fn unlabeled_fields_only_match_as_long_text() {
        let fields = vec![
            RemoteFieldDescriptor {
                id: "blank".into(),
                label: None,
                field_type: FieldType::ShortText,
            },
            RemoteFieldDescriptor {
                id: "body".into(),
                label: None,
                field_type: FieldType::LongText,
            },
        ];
        let mappings = map_fields(&acme(), &fields);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].field_id, "body");
    }

    #[test]
    fn empty_phone_is_not_written() {
        let fields = vec![RemoteFieldDescriptor::new("tel", "Telefone", "phone")];
        assert!(map_fields(&acme(), &fields).is_empty());
    }

    #[test]
    fn description_contains_every_value_verbatim() {
        let leads = [
            acme(),
            full_lead(),
            LeadSubmission {
                company: "  espaços  ".into(),
                email: "x@y.z".into(),
                phone: "+55 11 0000".into(),
                challenge: "<b>html</b> & \"quotes\"".into(),
            },
        ];
        for lead in &leads {
            let block = compose_description(lead);
            assert!(block.contains(&lead.company));
            assert!(block.contains(&lead.email));
            assert!(block.contains(&lead.phone));
            assert!(block.contains(&lead.challenge));
        }
    }

    #[test]
    fn mapped_ids_come_from_discovery() {
        let fields = vec![
            RemoteFieldDescriptor::new("f1", "Empresa", "short_text"),
            RemoteFieldDescriptor::new("f2", "Telefone", "phone"),
            RemoteFieldDescriptor::new("f3", "Desafio", "text"),
        ];
        for m in map_fields(&full_lead(), &fields) {
            assert!(fields.iter().any(|f| f.id == m.field_id));
        }
    }
}
