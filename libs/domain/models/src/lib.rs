// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS REGISTRY (V4.0 - SSoT)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: ENTIDADES CANÓNICAS DEL ECOSISTEMA DE INTELIGENCIA
 * =================================================================
 */

pub mod article;
pub mod cti;
pub mod flat;
pub mod incident;

pub use article::ArticleContent;
pub use cti::{
    CtiRecord, EducationRelevance, FileHashRef, IocBundle, MitreTechnique, TimelineEvent,
    VulnerabilityRef,
};
pub use flat::FlatEnrichment;
pub use incident::{make_incident_id, Incident, IncidentStatus, SourceConfidence};
