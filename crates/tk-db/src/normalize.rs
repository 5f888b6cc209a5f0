//! Entity Normalizer (C4): a pure function turning one page of nested
//! `Zaak` JSON into flat, deduplicated entity sets plus the FK backfills
//! described in §4.4/§9 ("one traversal, three deduplication maps").
//!
//! No I/O happens here, so a page can be normalized again on retry without
//! side effects — the upsert layer's idempotence does the rest.

use std::collections::HashMap;

use tk_core::{
    Case, CaseActor, CaseDossier, Decision, DocumentRef, Dossier, Faction, Person, Vote, VoteKind,
};
use tk_odata::raw::{RawCase, RawCaseActor, RawDossier, RawFaction, RawPerson};

/// The result of normalizing one page: flat entity sets in the order §4.5
/// expects them to be persisted, plus the case→document targets E1
/// enrichment needs before `Document` rows are discarded (§3: `Document`
/// is reference-only, not a persisted table).
#[derive(Debug, Default)]
pub struct NormalizedPage {
    pub persons: Vec<Person>,
    pub factions: Vec<Faction>,
    pub dossiers: Vec<Dossier>,
    pub cases: Vec<Case>,
    pub case_dossiers: Vec<CaseDossier>,
    pub case_actors: Vec<CaseActor>,
    pub decisions: Vec<Decision>,
    pub votes: Vec<Vote>,
    /// `(case_id, document)` pairs resolved by the subject-match rule of
    /// §4.4 step 6; consumed by E1 to fetch and extract the motion XML.
    pub case_documents: Vec<(String, DocumentRef)>,
    /// Entity-scoped conversion failures (§7): the entity is skipped, not
    /// the page.
    pub errors: Vec<String>,
}

impl NormalizedPage {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

fn normalize_subject(subject: Option<&str>) -> Option<String> {
    let trimmed = subject?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn convert_person(raw: &RawPerson) -> Person {
    let mut person = Person::new(&raw.id, &raw.last_name);
    if let Some(v) = &raw.first_name {
        person = person.with_first_name(v);
    }
    if let Some(v) = &raw.infix {
        person = person.with_infix(v);
    }
    if let Some(v) = &raw.initials {
        person = person.with_initials(v);
    }
    if let Some(dt) = raw.born_on.into_inner() {
        person = person.with_born_on(dt);
    }
    if let Some(dt) = raw.died_on.into_inner() {
        person = person.with_died_on(dt);
    }
    if let Some(v) = &raw.residence {
        person = person.with_residence(v);
    }
    person
}

fn convert_faction(raw: &RawFaction) -> Faction {
    let mut faction = Faction::new(&raw.id, &raw.abbreviation, &raw.name_nl);
    if let Some(v) = &raw.number {
        faction = faction.with_number(v);
    }
    if let Some(v) = &raw.name_en {
        faction = faction.with_name_en(v);
    }
    if let Some(v) = raw.seats {
        faction = faction.with_seats(v);
    }
    if let Some(v) = raw.votes {
        faction = faction.with_votes(v);
    }
    if let Some(dt) = raw.active_from.into_inner() {
        faction = faction.with_active_from(dt);
    }
    if let Some(dt) = raw.active_to.into_inner() {
        faction = faction.with_active_to(dt);
    }
    faction
}

fn convert_dossier(raw: &RawDossier) -> Dossier {
    let mut dossier = Dossier::new(&raw.id, raw.number.to_string()).with_highest_sequence(raw.highest_sequence);
    if let Some(v) = &raw.suffix {
        dossier = dossier.with_suffix(v);
    }
    if let Some(v) = &raw.title {
        dossier = dossier.with_title(v);
    }
    dossier = dossier.with_closed(raw.closed);
    if let Some(v) = &raw.chamber {
        dossier = dossier.with_chamber(v);
    }
    dossier
}

fn convert_actor(raw: &RawCaseActor, case_id: &str) -> CaseActor {
    // `ActorRelation::from_str` never errors; unrecognized relations fall
    // back to `Other`.
    let relation = raw.relation.parse().unwrap_or(tk_core::ActorRelation::Other);
    let mut actor = CaseActor::new(&raw.id, case_id, relation);
    if let Some(person) = &raw.person {
        actor = actor.with_person(&person.id);
    }
    if let Some(faction) = &raw.faction {
        actor = actor.with_faction(&faction.id);
    }
    if let Some(name) = &raw.actor_name {
        actor = actor.with_actor_name(name);
    }
    actor
}

/// Resolves `Case.source_document_key` by scanning every `Document` under
/// every `Dossier` attached to the case for a subject match (§4.4 step 6,
/// §9's "brittle when multiple revisions share a subject" note — this
/// keeps the documented first-match behavior rather than a
/// highest-sequence tiebreak).
fn resolve_document(raw_case: &RawCase) -> Option<DocumentRef> {
    let case_subject = normalize_subject(raw_case.subject.as_deref())?;
    for dossier in &raw_case.dossiers {
        for document in &dossier.documents {
            if document.deleted {
                continue;
            }
            if normalize_subject(document.subject.as_deref()).as_deref() == Some(case_subject.as_str()) {
                return Some(DocumentRef {
                    document_number: document.document_number.clone(),
                    subject: document.subject.clone(),
                    sequence_within_dossier: document.sequence_within_dossier,
                    dossier_id: dossier.id.clone(),
                });
            }
        }
    }
    None
}

/// Normalizes one page of nested `Zaak` JSON into flat entity sets (§4.4).
///
/// Purely functional over `raw`: restartable and idempotent by
/// construction. Entity-scoped conversion failures are recorded in
/// [`NormalizedPage::errors`] and the offending entity is skipped rather
/// than failing the whole page (§7).
#[must_use]
pub fn normalize_page(raw: Vec<RawCase>) -> NormalizedPage {
    let mut page = NormalizedPage::default();
    let mut persons: HashMap<String, Person> = HashMap::new();
    let mut factions: HashMap<String, Faction> = HashMap::new();
    let mut dossiers: HashMap<String, Dossier> = HashMap::new();

    for raw_case in &raw {
        for raw_decision in &raw_case.decisions {
            if raw_decision.deleted {
                continue;
            }
            let Ok(vote_kind) = raw_decision.vote_kind.parse::<VoteKind>() else {
                page.errors
                    .push(format!("decision {}: invalid vote kind {:?}", raw_decision.id, raw_decision.vote_kind));
                continue;
            };

            let mut decision = Decision::new(&raw_decision.id, &raw_case.id, vote_kind);
            decision.status = raw_decision.status.clone();
            decision.decision_kind = raw_decision.decision_kind.clone();
            decision.decision_text = raw_decision.decision_text.clone();
            decision.ordering_within_agenda = raw_decision.ordering_within_agenda;
            if let Some(dt) = raw_decision.updated_at.into_inner() {
                decision.updated_at = dt;
            }

            for raw_vote in &raw_decision.votes {
                if raw_vote.deleted {
                    continue;
                }
                let Ok(choice) = raw_vote.choice.parse() else {
                    page.errors.push(format!("vote {}: invalid choice {:?}", raw_vote.id, raw_vote.choice));
                    continue;
                };

                let mut vote = Vote::new(&raw_vote.id, &raw_decision.id, choice)
                    .with_is_correction(raw_vote.is_correction);
                if let Some(size) = raw_vote.faction_size {
                    vote = vote.with_faction_size(size);
                }
                if let Some(name) = &raw_vote.actor_name {
                    vote = vote.with_actor_name(name);
                }
                if let Some(name) = &raw_vote.actor_faction_name {
                    vote = vote.with_actor_faction_name(name);
                }
                if let Some(person) = &raw_vote.person {
                    vote = vote.with_person(&person.id);
                    persons.entry(person.id.clone()).or_insert_with(|| convert_person(person));
                }
                if let Some(faction) = &raw_vote.faction {
                    vote = vote.with_faction(&faction.id);
                    factions.entry(faction.id.clone()).or_insert_with(|| convert_faction(faction));
                }
                page.votes.push(vote);
            }

            page.decisions.push(decision);
        }

        for raw_actor in &raw_case.case_actors {
            if raw_actor.deleted {
                continue;
            }
            if let Some(person) = &raw_actor.person {
                persons.entry(person.id.clone()).or_insert_with(|| convert_person(person));
            }
            if let Some(faction) = &raw_actor.faction {
                factions.entry(faction.id.clone()).or_insert_with(|| convert_faction(faction));
            }
            page.case_actors.push(convert_actor(raw_actor, &raw_case.id));
        }

        for raw_dossier in &raw_case.dossiers {
            dossiers.entry(raw_dossier.id.clone()).or_insert_with(|| convert_dossier(raw_dossier));
            page.case_dossiers.push(CaseDossier::new(raw_case.id.clone(), raw_dossier.id.clone()));
        }

        let matched_document = resolve_document(raw_case);

        let mut case = Case::new(&raw_case.id, &raw_case.nummer, raw_case.kind.parse().unwrap_or(tk_core::CaseKind::Other));
        case.subject = raw_case.subject.clone();
        case.title = raw_case.title.clone();
        case.status = raw_case.status.clone();
        case.started_at = raw_case.started_at.into_inner();
        case.session_year = raw_case.session_year.clone();
        case.organization = raw_case.organization.clone();
        case.finished = raw_case.finished;
        if let Some(dt) = raw_case.updated_at.into_inner() {
            case.updated_at = dt;
        }
        case.source_updated_at = raw_case.source_updated_at.into_inner();
        case.deleted = raw_case.deleted;
        if let Some(doc) = &matched_document {
            case.source_document_key = Some(doc.document_number.clone());
            page.case_documents.push((raw_case.id.clone(), doc.clone()));
        }

        page.cases.push(case);
    }

    page.persons = persons.into_values().collect();
    page.factions = factions.into_values().collect();
    page.dossiers = dossiers.into_values().collect();
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use tk_odata::raw::{RawCaseActor, RawDecision, RawDocument, RawDossier, RawVote};

    fn raw_person(id: &str) -> RawPerson {
        RawPerson {
            id: id.to_string(),
            first_name: Some("Jan".to_string()),
            infix: None,
            last_name: "Jansen".to_string(),
            initials: None,
            born_on: tk_core::OdataDate::none(),
            died_on: tk_core::OdataDate::none(),
            residence: None,
        }
    }

    fn raw_faction(id: &str) -> RawFaction {
        RawFaction {
            id: id.to_string(),
            number: None,
            abbreviation: "ABC".to_string(),
            name_nl: "Voorbeeldpartij".to_string(),
            name_en: None,
            seats: None,
            votes: None,
            active_from: tk_core::OdataDate::none(),
            active_to: tk_core::OdataDate::none(),
        }
    }

    fn raw_vote(id: &str, person_id: &str, faction_id: &str) -> RawVote {
        RawVote {
            id: id.to_string(),
            choice: "Voor".to_string(),
            faction_size: Some(10),
            actor_name: Some("Jan Jansen".to_string()),
            actor_faction_name: Some("Voorbeeldpartij".to_string()),
            is_correction: false,
            deleted: false,
            person: Some(raw_person(person_id)),
            faction: Some(raw_faction(faction_id)),
        }
    }

    fn raw_case_with_one_vote() -> RawCase {
        RawCase {
            id: "c1".to_string(),
            nummer: "2024Z00001".to_string(),
            kind: "Motion".to_string(),
            subject: Some("Klimaatbeleid 2024".to_string()),
            title: Some("Motie over klimaat".to_string()),
            status: None,
            started_at: tk_core::OdataDate::none(),
            session_year: None,
            organization: None,
            finished: false,
            updated_at: tk_core::OdataDate::none(),
            source_updated_at: tk_core::OdataDate::none(),
            deleted: false,
            decisions: vec![RawDecision {
                id: "d1".to_string(),
                vote_kind: "Hoofdelijk".to_string(),
                decision_kind: None,
                decision_text: None,
                status: None,
                ordering_within_agenda: None,
                updated_at: tk_core::OdataDate::none(),
                deleted: false,
                votes: vec![raw_vote("v1", "p1", "f1")],
            }],
            case_actors: vec![],
            dossiers: vec![],
        }
    }

    /// S1: one case / one decision / one vote.
    #[test]
    fn normalizes_single_case_decision_vote() {
        let page = normalize_page(vec![raw_case_with_one_vote()]);
        assert_eq!(page.cases.len(), 1);
        assert_eq!(page.decisions.len(), 1);
        assert_eq!(page.votes.len(), 1);
        assert_eq!(page.persons.len(), 1);
        assert_eq!(page.factions.len(), 1);
        assert!(page.cases[0].bullet_points.is_none());
        assert!(page.errors.is_empty());
    }

    /// Every vote's `decision_id` points at a decision whose `case_id`
    /// points at the case — normalization completeness (§8.2).
    #[test]
    fn fk_chain_is_consistent() {
        let page = normalize_page(vec![raw_case_with_one_vote()]);
        let vote = &page.votes[0];
        let decision = page.decisions.iter().find(|d| d.id == vote.decision_id).unwrap();
        assert_eq!(decision.case_id, "c1");
    }

    /// S2: 3 cases sharing one faction across 10 votes dedups the faction
    /// to exactly one row.
    #[test]
    fn dedups_shared_faction_across_cases() {
        let mut cases = Vec::new();
        for case_idx in 0..3 {
            let mut case = raw_case_with_one_vote();
            case.id = format!("c{case_idx}");
            case.decisions[0].id = format!("d{case_idx}");
            let votes_per_case = if case_idx == 2 { 4 } else { 3 };
            case.decisions[0].votes = (0..votes_per_case)
                .map(|v| raw_vote(&format!("v{case_idx}-{v}"), &format!("p{case_idx}-{v}"), "shared-faction"))
                .collect();
            cases.push(case);
        }

        let page = normalize_page(cases);
        assert_eq!(page.votes.len(), 10);
        assert_eq!(page.factions.len(), 1);
    }

    #[test]
    fn resolves_source_document_by_subject_match() {
        let mut case = raw_case_with_one_vote();
        case.dossiers = vec![RawDossier {
            id: "dos1".to_string(),
            number: tk_core::DossierNumber("36410".to_string()),
            suffix: None,
            title: None,
            highest_sequence: 3,
            closed: false,
            chamber: None,
            documents: vec![RawDocument {
                document_number: "2024D00123".to_string(),
                subject: Some("  klimaatbeleid 2024  ".to_string()),
                sequence_within_dossier: 2,
                kind: "Motie".to_string(),
                deleted: false,
                updated_at: tk_core::OdataDate::none(),
            }],
        }];

        let page = normalize_page(vec![case]);
        assert_eq!(page.cases[0].source_document_key.as_deref(), Some("2024D00123"));
        assert_eq!(page.case_documents.len(), 1);
        assert_eq!(page.case_documents[0].1.dossier_id, "dos1");
    }

    #[test]
    fn no_document_match_leaves_key_null() {
        let mut case = raw_case_with_one_vote();
        case.dossiers = vec![RawDossier {
            id: "dos1".to_string(),
            number: tk_core::DossierNumber("36410".to_string()),
            suffix: None,
            title: None,
            highest_sequence: 1,
            closed: false,
            chamber: None,
            documents: vec![RawDocument {
                document_number: "2024D00999".to_string(),
                subject: Some("Heel iets anders".to_string()),
                sequence_within_dossier: 1,
                kind: "Motie".to_string(),
                deleted: false,
                updated_at: tk_core::OdataDate::none(),
            }],
        }];

        let page = normalize_page(vec![case]);
        assert!(page.cases[0].source_document_key.is_none());
        assert!(page.case_documents.is_empty());
    }

    #[test]
    fn invalid_vote_choice_is_skipped_not_fatal() {
        let mut case = raw_case_with_one_vote();
        case.decisions[0].votes[0].choice = "Ongeldig".to_string();
        let page = normalize_page(vec![case]);
        assert!(page.votes.is_empty());
        assert_eq!(page.errors.len(), 1);
        assert!(page.cases.len() == 1, "the case itself still lands");
    }

    #[test]
    fn case_actor_without_person_or_faction_is_nullable() {
        let mut case = raw_case_with_one_vote();
        case.case_actors = vec![RawCaseActor {
            id: "actor1".to_string(),
            relation: "Indiener".to_string(),
            actor_name: Some("Jan Jansen".to_string()),
            deleted: false,
            person: None,
            faction: None,
        }];
        let page = normalize_page(vec![case]);
        assert_eq!(page.case_actors.len(), 1);
        assert!(page.case_actors[0].person_id.is_none());
        assert!(page.case_actors[0].faction_id.is_none());
        assert!(page.case_actors[0].is_submitter());
    }
}
