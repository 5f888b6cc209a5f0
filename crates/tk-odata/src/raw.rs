//! Wire shapes for the `Zaak` entity set and its expanded relations (§4.1,
//! §6). Field names match the upstream feed's own Dutch property names;
//! they are translated into [`tk_core`] entities by the normalizer, not
//! here — this module only decodes JSON.

use serde::{Deserialize, Serialize};
use tk_core::{DossierNumber, OdataDate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPerson {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Voornaam")]
    pub first_name: Option<String>,
    #[serde(rename = "Tussenvoegsel")]
    pub infix: Option<String>,
    #[serde(rename = "Achternaam")]
    pub last_name: String,
    #[serde(rename = "Initialen")]
    pub initials: Option<String>,
    #[serde(rename = "Geboortedatum")]
    pub born_on: OdataDate,
    #[serde(rename = "Overlijdensdatum")]
    pub died_on: OdataDate,
    #[serde(rename = "Woonplaats")]
    pub residence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFaction {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "NummerExtern")]
    pub number: Option<String>,
    #[serde(rename = "Afkorting")]
    pub abbreviation: String,
    #[serde(rename = "NaamNL")]
    pub name_nl: String,
    #[serde(rename = "NaamEN")]
    pub name_en: Option<String>,
    #[serde(rename = "AantalZetels")]
    pub seats: Option<i32>,
    #[serde(rename = "AantalStemmen")]
    pub votes: Option<i32>,
    #[serde(rename = "DatumActief")]
    pub active_from: OdataDate,
    #[serde(rename = "DatumInactief")]
    pub active_to: OdataDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVote {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Soort")]
    pub choice: String,
    #[serde(rename = "FractieGrootte")]
    pub faction_size: Option<i32>,
    #[serde(rename = "ActorNaam")]
    pub actor_name: Option<String>,
    #[serde(rename = "ActorFractie")]
    pub actor_faction_name: Option<String>,
    #[serde(rename = "Vergissing")]
    pub is_correction: bool,
    #[serde(rename = "Verwijderd")]
    pub deleted: bool,
    #[serde(rename = "Persoon")]
    pub person: Option<RawPerson>,
    #[serde(rename = "Fractie")]
    pub faction: Option<RawFaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDecision {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "StemmingsSoort")]
    pub vote_kind: String,
    #[serde(rename = "BesluitSoort")]
    pub decision_kind: Option<String>,
    #[serde(rename = "BesluitTekst")]
    pub decision_text: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Agendapunt")]
    pub ordering_within_agenda: Option<i32>,
    #[serde(rename = "GewijzigdOp")]
    pub updated_at: OdataDate,
    #[serde(rename = "Verwijderd")]
    pub deleted: bool,
    #[serde(rename = "Stemming", default)]
    pub votes: Vec<RawVote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCaseActor {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Relatie")]
    pub relation: String,
    #[serde(rename = "ActorNaam")]
    pub actor_name: Option<String>,
    #[serde(rename = "Verwijderd")]
    pub deleted: bool,
    #[serde(rename = "Persoon")]
    pub person: Option<RawPerson>,
    #[serde(rename = "Fractie")]
    pub faction: Option<RawFaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "DocumentNummer")]
    pub document_number: String,
    #[serde(rename = "Onderwerp")]
    pub subject: Option<String>,
    #[serde(rename = "Volgnummer")]
    pub sequence_within_dossier: i32,
    #[serde(rename = "Soort")]
    pub kind: String,
    #[serde(rename = "Verwijderd")]
    pub deleted: bool,
    #[serde(rename = "GewijzigdOp")]
    pub updated_at: OdataDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDossier {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Nummer")]
    pub number: DossierNumber,
    #[serde(rename = "Toevoeging")]
    pub suffix: Option<String>,
    #[serde(rename = "Titel")]
    pub title: Option<String>,
    #[serde(rename = "HoogsteVolgnummer")]
    pub highest_sequence: i32,
    #[serde(rename = "Afgesloten")]
    pub closed: bool,
    #[serde(rename = "Kamer")]
    pub chamber: Option<String>,
    #[serde(rename = "Kamerstuk", default)]
    pub documents: Vec<RawDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCase {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Nummer")]
    pub nummer: String,
    #[serde(rename = "Soort")]
    pub kind: String,
    #[serde(rename = "Onderwerp")]
    pub subject: Option<String>,
    #[serde(rename = "Titel")]
    pub title: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "GestartOp")]
    pub started_at: OdataDate,
    #[serde(rename = "Zittingsjaar")]
    pub session_year: Option<String>,
    #[serde(rename = "Organisatie")]
    pub organization: Option<String>,
    #[serde(rename = "Afgedaan")]
    pub finished: bool,
    #[serde(rename = "GewijzigdOp")]
    pub updated_at: OdataDate,
    #[serde(rename = "ApiGewijzigdOp")]
    pub source_updated_at: OdataDate,
    #[serde(rename = "Verwijderd")]
    pub deleted: bool,
    #[serde(rename = "Besluit", default)]
    pub decisions: Vec<RawDecision>,
    #[serde(rename = "ZaakActor", default)]
    pub case_actors: Vec<RawCaseActor>,
    #[serde(rename = "Kamerstukdossier", default)]
    pub dossiers: Vec<RawDossier>,
}
