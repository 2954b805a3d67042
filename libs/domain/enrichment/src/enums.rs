// [libs/domain/enrichment/src/enums.rs]
/*!
 * =================================================================
 * APARATO: CLOSED VOCABULARY TABLES (V4.2 - CONST STRATA)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CONJUNTOS CERRADOS Y MAPAS DE ALIAS DEL ESQUEMA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONST TABLES: los vocabularios son amplios pero acíclicos; viven
 *    como constantes, jamás se generan en runtime.
 * 2. ALIAS FIRST: la coerción intenta el mapa de alias explícito y solo
 *    después la coincidencia por subcadena; lo desconocido colapsa a
 *    `other` (escala res) o se descarta (elementos de lista).
 * =================================================================
 */

// ========== TIPOS DE INSTITUCIÓN ==========
pub const INSTITUTION_TYPES: &[&str] = &[
    "university_public",
    "university_private",
    "university_research",
    "community_college",
    "technical_college",
    "vocational_school",
    "k12_public_school",
    "k12_private_school",
    "k12_charter_school",
    "school_district",
    "research_institute",
    "research_center",
    "medical_school",
    "university_hospital",
    "teaching_hospital",
    "online_university",
    "consortium",
    "education_department",
    "education_ministry",
    "student_loan_servicer",
    "education_nonprofit",
    "education_vendor",
    "unknown",
];

pub const INSTITUTION_SIZES: &[&str] = &[
    "small_under_5k",
    "medium_5k_20k",
    "large_20k_50k",
    "very_large_over_50k",
    "unknown",
];

// ========== CLASIFICACIÓN DEL INCIDENTE ==========
pub const INCIDENT_SEVERITIES: &[&str] = &["critical", "high", "medium", "low", "informational"];

pub const INCIDENT_STATUSES: &[&str] = &["ongoing", "contained", "resolved", "unknown"];

pub const INCIDENT_DATE_PRECISIONS: &[&str] =
    &["exact", "approximate", "month_only", "year_only", "unknown"];

// ========== LÍNEA TEMPORAL ==========
pub const TIMELINE_EVENT_TYPES: &[&str] = &[
    "initial_access",
    "reconnaissance",
    "lateral_movement",
    "privilege_escalation",
    "data_exfiltration",
    "encryption_started",
    "ransom_demand",
    "discovery",
    "containment",
    "eradication",
    "recovery",
    "disclosure",
    "notification",
    "investigation",
    "remediation",
    "law_enforcement_contact",
    "public_statement",
    "systems_restored",
    "other",
];

pub const TIMELINE_EVENT_TYPE_ALIASES: &[(&str, &str)] = &[
    ("initial access", "initial_access"),
    ("discovered", "discovery"),
    ("detected", "discovery"),
    ("exploited", "initial_access"),
    ("impacted", "other"),
    ("contained", "containment"),
    ("eradicated", "eradication"),
    ("recovered", "recovery"),
    ("restored", "systems_restored"),
    ("disclosed", "disclosure"),
    ("notified", "notification"),
    ("investigated", "investigation"),
    ("remediated", "remediation"),
    ("law enforcement", "law_enforcement_contact"),
    ("statement", "public_statement"),
    ("ransom", "ransom_demand"),
    ("encryption", "encryption_started"),
    ("exfiltration", "data_exfiltration"),
];

pub const TIMELINE_DATE_PRECISIONS: &[&str] = &["day", "month", "year", "approximate"];

// ========== CATEGORÍAS DE ATAQUE ==========
pub const ATTACK_CATEGORIES: &[&str] = &[
    "ransomware_encryption",
    "ransomware_double_extortion",
    "ransomware_triple_extortion",
    "ransomware_data_leak_only",
    "phishing_credential_harvest",
    "phishing_malware_delivery",
    "spear_phishing",
    "whaling",
    "business_email_compromise",
    "smishing",
    "vishing",
    "data_breach_external",
    "data_breach_internal",
    "data_exposure_misconfiguration",
    "data_leak_accidental",
    "ddos_volumetric",
    "ddos_application",
    "ddos_protocol",
    "malware_trojan",
    "malware_worm",
    "malware_backdoor",
    "malware_rootkit",
    "malware_cryptominer",
    "malware_infostealer",
    "malware_rat",
    "malware_botnet",
    "unauthorized_access",
    "privilege_escalation",
    "credential_stuffing",
    "brute_force",
    "password_spraying",
    "web_defacement",
    "sql_injection",
    "xss_attack",
    "api_abuse",
    "insider_malicious",
    "insider_negligent",
    "insider_compromised",
    "supply_chain_software",
    "supply_chain_hardware",
    "supply_chain_service_provider",
    "third_party_compromise",
    "social_engineering",
    "physical_breach",
    "account_takeover",
    "extortion_no_ransomware",
    "hacktivism",
    "espionage",
    "sabotage",
    "fraud",
    "unknown",
    "other",
];

pub const ATTACK_CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("ransomware", "ransomware_encryption"),
    ("double extortion", "ransomware_double_extortion"),
    ("phishing", "phishing_credential_harvest"),
    ("data breach", "data_breach_external"),
    ("breach", "data_breach_external"),
    ("ddos", "ddos_volumetric"),
    ("denial of service", "ddos_volumetric"),
    ("malware", "malware_trojan"),
    ("defacement", "web_defacement"),
    ("bec", "business_email_compromise"),
    ("insider", "insider_malicious"),
    ("supply chain", "supply_chain_software"),
    ("third party", "third_party_compromise"),
    ("extortion", "extortion_no_ransomware"),
];

// ========== VECTORES DE ATAQUE ==========
pub const ATTACK_VECTORS: &[&str] = &[
    "phishing_email",
    "spear_phishing_email",
    "malicious_attachment",
    "malicious_link",
    "business_email_compromise",
    "stolen_credentials",
    "credential_stuffing",
    "brute_force",
    "password_spraying",
    "credential_phishing",
    "session_hijacking",
    "vulnerability_exploit_known",
    "vulnerability_exploit_zero_day",
    "unpatched_system",
    "misconfiguration",
    "default_credentials",
    "drive_by_download",
    "watering_hole",
    "malvertising",
    "sql_injection",
    "xss",
    "csrf",
    "ssrf",
    "path_traversal",
    "exposed_service",
    "exposed_rdp",
    "exposed_vpn",
    "exposed_ssh",
    "exposed_database",
    "exposed_api",
    "man_in_the_middle",
    "supply_chain_compromise",
    "third_party_vendor",
    "software_update_compromise",
    "trusted_relationship",
    "social_engineering",
    "pretexting",
    "baiting",
    "tailgating",
    "usb_drop",
    "insider_access",
    "former_employee",
    "cloud_misconfiguration",
    "api_key_exposure",
    "storage_bucket_exposure",
    "dns_hijacking",
    "bgp_hijacking",
    "sim_swapping",
    "unknown",
    "other",
];

pub const ATTACK_VECTOR_ALIASES: &[(&str, &str)] = &[
    ("phishing email", "phishing_email"),
    ("email phishing", "phishing_email"),
    ("phish", "phishing_email"),
    ("spear phishing", "spear_phishing_email"),
    ("targeted phishing", "spear_phishing_email"),
    ("stolen credentials", "stolen_credentials"),
    ("compromised credentials", "stolen_credentials"),
    ("credential theft", "stolen_credentials"),
    ("credential stuffing", "credential_stuffing"),
    ("credential reuse", "credential_stuffing"),
    ("brute force", "brute_force"),
    ("password spray", "password_spraying"),
    ("vulnerability", "vulnerability_exploit_known"),
    ("exploit", "vulnerability_exploit_known"),
    ("cve", "vulnerability_exploit_known"),
    ("zero day", "vulnerability_exploit_zero_day"),
    ("zero-day", "vulnerability_exploit_zero_day"),
    ("unpatched", "unpatched_system"),
    ("misconfig", "misconfiguration"),
    ("rdp", "exposed_rdp"),
    ("vpn", "exposed_vpn"),
    ("sql injection", "sql_injection"),
    ("sqli", "sql_injection"),
    ("cross-site scripting", "xss"),
    ("supply chain", "supply_chain_compromise"),
    ("third party", "third_party_vendor"),
    ("vendor", "third_party_vendor"),
    ("social engineering", "social_engineering"),
    ("insider", "insider_access"),
    ("bucket", "storage_bucket_exposure"),
];

// ========== CADENA DE ATAQUE / TÁCTICAS MITRE ==========
pub const KILL_CHAIN_PHASES: &[&str] = &[
    "reconnaissance",
    "resource_development",
    "initial_access",
    "execution",
    "persistence",
    "privilege_escalation",
    "defense_evasion",
    "credential_access",
    "discovery",
    "lateral_movement",
    "collection",
    "command_and_control",
    "exfiltration",
    "impact",
];

pub const KILL_CHAIN_ALIASES: &[(&str, &str)] = &[
    ("recon", "reconnaissance"),
    ("weaponization", "resource_development"),
    ("delivery", "initial_access"),
    ("exploitation", "initial_access"),
    ("installation", "persistence"),
    ("command and control", "command_and_control"),
    ("c2", "command_and_control"),
    ("c&c", "command_and_control"),
    ("actions on objectives", "impact"),
    ("exfil", "exfiltration"),
    ("lateral movement", "lateral_movement"),
    ("privilege escalation", "privilege_escalation"),
    ("defense evasion", "defense_evasion"),
    ("credential access", "credential_access"),
];

/// Identificadores de táctica MITRE hacia su nombre canónico.
pub const TACTIC_ID_TO_NAME: &[(&str, &str)] = &[
    ("TA0043", "reconnaissance"),
    ("TA0042", "resource_development"),
    ("TA0001", "initial_access"),
    ("TA0002", "execution"),
    ("TA0003", "persistence"),
    ("TA0004", "privilege_escalation"),
    ("TA0005", "defense_evasion"),
    ("TA0006", "credential_access"),
    ("TA0007", "discovery"),
    ("TA0008", "lateral_movement"),
    ("TA0009", "collection"),
    ("TA0011", "command_and_control"),
    ("TA0010", "exfiltration"),
    ("TA0040", "impact"),
];

// ========== ACTOR DE AMENAZA ==========
pub const THREAT_ACTOR_CATEGORIES: &[&str] = &[
    "apt_nation_state",
    "apt_state_sponsored",
    "cybercriminal_organized",
    "cybercriminal_individual",
    "ransomware_gang",
    "ransomware_affiliate",
    "hacktivist",
    "insider_threat",
    "script_kiddie",
    "competitor",
    "unknown",
    "other",
];

pub const THREAT_ACTOR_MOTIVATIONS: &[&str] = &[
    "financial_gain",
    "espionage",
    "hacktivism",
    "sabotage",
    "personal_grievance",
    "notoriety",
    "research_theft",
    "competitive_advantage",
    "unknown",
];

// ========== FAMILIAS DE RANSOMWARE ==========
pub const RANSOMWARE_FAMILIES: &[&str] = &[
    "lockbit",
    "lockbit_2",
    "lockbit_3",
    "blackcat_alphv",
    "cl0p_clop",
    "akira",
    "play",
    "8base",
    "bianlian",
    "royal",
    "black_basta",
    "medusa",
    "rhysida",
    "hunters_international",
    "inc_ransom",
    "vice_society",
    "hive",
    "conti",
    "ryuk",
    "revil_sodinokibi",
    "darkside",
    "blackmatter",
    "maze",
    "netwalker",
    "ragnar_locker",
    "avaddon",
    "cuba",
    "pysa_mespinoza",
    "babuk",
    "grief",
    "snatch",
    "quantum",
    "karakurt",
    "lorenz",
    "noescape",
    "cactus",
    "trigona",
    "money_message",
    "nokoyawa",
    "ransomhouse",
    "daixin",
    "unknown",
    "other",
];

pub const RANSOMWARE_ALIASES: &[(&str, &str)] = &[
    ("lockbit 2.0", "lockbit_2"),
    ("lockbit 3.0", "lockbit_3"),
    ("lockbit black", "lockbit_3"),
    ("blackcat", "blackcat_alphv"),
    ("alphv", "blackcat_alphv"),
    ("noberus", "blackcat_alphv"),
    ("cl0p", "cl0p_clop"),
    ("clop", "cl0p_clop"),
    ("revil", "revil_sodinokibi"),
    ("sodinokibi", "revil_sodinokibi"),
    ("sodin", "revil_sodinokibi"),
    ("vice society", "vice_society"),
    ("black basta", "black_basta"),
    ("blackbasta", "black_basta"),
    ("blacksuit", "royal"),
    ("pysa", "pysa_mespinoza"),
    ("mespinoza", "pysa_mespinoza"),
    ("hunters international", "hunters_international"),
    ("inc ransom", "inc_ransom"),
    ("ragnar", "ragnar_locker"),
    ("money message", "money_message"),
];

pub const RANSOM_CRYPTOCURRENCIES: &[&str] = &["bitcoin", "monero", "ethereum", "other", "unknown"];

// ========== CATEGORÍAS DE DATOS ==========
pub const DATA_CATEGORIES: &[&str] = &[
    "student_pii",
    "student_ssn",
    "student_grades",
    "student_transcripts",
    "student_financial_aid",
    "student_disciplinary",
    "student_health_records",
    "student_immigration",
    "student_housing",
    "employee_pii",
    "employee_ssn",
    "employee_payroll",
    "employee_benefits",
    "employee_performance",
    "employee_background_checks",
    "alumni_pii",
    "alumni_donation_history",
    "research_data",
    "research_grants",
    "research_ip",
    "research_unpublished",
    "research_classified",
    "financial_records",
    "bank_accounts",
    "credit_cards",
    "tax_records",
    "donor_information",
    "medical_records",
    "health_insurance",
    "mental_health",
    "disability_records",
    "usernames_passwords",
    "api_keys",
    "certificates",
    "intellectual_property",
    "legal_documents",
    "contracts",
    "internal_communications",
    "security_configurations",
    "network_diagrams",
    "other",
];

pub const DATA_CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("student records", "student_pii"),
    ("student data", "student_pii"),
    ("social security", "student_ssn"),
    ("grades", "student_grades"),
    ("transcripts", "student_transcripts"),
    ("financial aid", "student_financial_aid"),
    ("staff data", "employee_pii"),
    ("employee data", "employee_pii"),
    ("payroll", "employee_payroll"),
    ("alumni", "alumni_pii"),
    ("research", "research_data"),
    ("medical", "medical_records"),
    ("health records", "medical_records"),
    ("credentials", "usernames_passwords"),
    ("passwords", "usernames_passwords"),
    ("pii", "student_pii"),
    ("financial", "financial_records"),
    ("credit card", "credit_cards"),
];

// ========== SISTEMAS AFECTADOS ==========
pub const SYSTEMS_AFFECTED: &[&str] = &[
    "email_system",
    "active_directory",
    "identity_management",
    "vpn",
    "firewall",
    "dns",
    "dhcp",
    "file_servers",
    "backup_systems",
    "virtualization",
    "core_network",
    "wifi_network",
    "voip_phone",
    "data_center",
    "public_website",
    "student_portal",
    "staff_portal",
    "alumni_portal",
    "applicant_portal",
    "lms_learning_management",
    "sis_student_information",
    "registration_system",
    "grade_system",
    "library_system",
    "exam_proctoring",
    "erp_system",
    "hr_system",
    "payroll_system",
    "financial_system",
    "procurement",
    "admissions_system",
    "financial_aid_system",
    "research_computing_hpc",
    "research_storage",
    "lab_instruments",
    "research_databases",
    "ehr_emr",
    "hospital_systems",
    "medical_devices",
    "pharmacy_system",
    "printing_system",
    "parking_system",
    "physical_access",
    "cctv_security",
    "other",
];

pub const SYSTEMS_AFFECTED_ALIASES: &[(&str, &str)] = &[
    ("email", "email_system"),
    ("mail server", "email_system"),
    ("mail", "email_system"),
    ("student information system", "sis_student_information"),
    ("sis", "sis_student_information"),
    ("student portal", "student_portal"),
    ("portal", "student_portal"),
    ("learning management", "lms_learning_management"),
    ("lms", "lms_learning_management"),
    ("moodle", "lms_learning_management"),
    ("canvas", "lms_learning_management"),
    ("network", "core_network"),
    ("wifi", "wifi_network"),
    ("wireless", "wifi_network"),
    ("website", "public_website"),
    ("web site", "public_website"),
    ("phone", "voip_phone"),
    ("voip", "voip_phone"),
    ("telephony", "voip_phone"),
    ("payroll", "payroll_system"),
    ("hr", "hr_system"),
    ("finance", "financial_system"),
    ("financial", "financial_system"),
    ("accounting", "financial_system"),
    ("admissions", "admissions_system"),
    ("registration", "registration_system"),
    ("library", "library_system"),
    ("backup", "backup_systems"),
    ("backups", "backup_systems"),
    ("file share", "file_servers"),
    ("file server", "file_servers"),
    ("hpc", "research_computing_hpc"),
    ("research computing", "research_computing_hpc"),
    ("hospital", "hospital_systems"),
    ("ehr", "ehr_emr"),
    ("emr", "ehr_emr"),
    ("directory", "active_directory"),
];

// ========== IMPACTOS OPERACIONALES ==========
pub const OPERATIONAL_IMPACTS: &[&str] = &[
    "classes_cancelled",
    "classes_moved_online",
    "exams_postponed",
    "exams_cancelled",
    "graduation_delayed",
    "semester_extended",
    "campus_closed",
    "research_halted",
    "research_data_lost",
    "payroll_delayed",
    "financial_aid_delayed",
    "admissions_suspended",
    "registration_suspended",
    "email_unavailable",
    "website_down",
    "student_portal_down",
    "lms_unavailable",
    "network_offline",
    "vpn_unavailable",
    "library_closed",
    "it_helpdesk_overwhelmed",
    "manual_processes_required",
    "clinical_operations_disrupted",
    "patient_care_affected",
    "other",
];

pub const OPERATIONAL_IMPACT_ALIASES: &[(&str, &str)] = &[
    ("classes cancelled", "classes_cancelled"),
    ("classes canceled", "classes_cancelled"),
    ("teaching disrupted", "classes_cancelled"),
    ("moved online", "classes_moved_online"),
    ("remote learning", "classes_moved_online"),
    ("exams postponed", "exams_postponed"),
    ("exam delay", "exams_postponed"),
    ("graduation delayed", "graduation_delayed"),
    ("campus closed", "campus_closed"),
    ("research halted", "research_halted"),
    ("research disrupted", "research_halted"),
    ("payroll delayed", "payroll_delayed"),
    ("payroll disrupted", "payroll_delayed"),
    ("email down", "email_unavailable"),
    ("email unavailable", "email_unavailable"),
    ("website down", "website_down"),
    ("portal down", "student_portal_down"),
    ("lms down", "lms_unavailable"),
    ("network down", "network_offline"),
    ("network offline", "network_offline"),
    ("vpn down", "vpn_unavailable"),
    ("library closed", "library_closed"),
    ("manual processes", "manual_processes_required"),
    ("clinical", "clinical_operations_disrupted"),
    ("patient care", "patient_care_affected"),
];

// ========== IMPACTO FINANCIERO Y DE NEGOCIO ==========
pub const BUSINESS_IMPACT_SEVERITIES: &[&str] = &[
    "catastrophic",
    "critical",
    "major",
    "moderate",
    "minor",
    "negligible",
];

pub const BUSINESS_IMPACT_ALIASES: &[(&str, &str)] = &[
    ("severe", "critical"),
    ("very critical", "catastrophic"),
    ("high", "major"),
    ("medium", "moderate"),
    ("limited", "minor"),
    ("low", "minor"),
    ("minimal", "negligible"),
];

pub const ENCRYPTION_EXTENTS: &[&str] =
    &["full_encryption", "partial_encryption", "no_encryption", "unknown"];

pub const ENCRYPTION_EXTENT_ALIASES: &[(&str, &str)] = &[
    ("full", "full_encryption"),
    ("complete", "full_encryption"),
    ("entire", "full_encryption"),
    ("partial", "partial_encryption"),
    ("some", "partial_encryption"),
    ("portion", "partial_encryption"),
    ("none", "no_encryption"),
    ("not encrypted", "no_encryption"),
    ("no encryption", "no_encryption"),
];

// ========== REGULACIONES ==========
pub const APPLICABLE_REGULATIONS: &[&str] = &[
    "FERPA",
    "HIPAA",
    "GDPR",
    "CCPA_CPRA",
    "PCI_DSS",
    "GLBA",
    "SOX",
    "UK_DPA",
    "Australia_Privacy_Act",
    "Canada_PIPEDA",
    "state_breach_notification",
    "other",
];

pub const REGULATION_ALIASES: &[(&str, &str)] = &[
    ("ferpa", "FERPA"),
    ("hipaa", "HIPAA"),
    ("gdpr", "GDPR"),
    ("ccpa", "CCPA_CPRA"),
    ("cpra", "CCPA_CPRA"),
    ("pci", "PCI_DSS"),
    ("pci-dss", "PCI_DSS"),
    ("glba", "GLBA"),
    ("sox", "SOX"),
    ("uk dpa", "UK_DPA"),
    ("pipeda", "Canada_PIPEDA"),
    ("breach notification", "state_breach_notification"),
];

// ========== RECUPERACIÓN ==========
pub const RECOVERY_METHODS: &[&str] = &[
    "backup_restore",
    "decryptor_used",
    "ransom_paid_decryption",
    "clean_rebuild",
    "partial_backup_partial_rebuild",
    "ongoing",
    "unknown",
];

pub const RECOVERY_METHOD_ALIASES: &[(&str, &str)] = &[
    ("backup", "backup_restore"),
    ("restored from backup", "backup_restore"),
    ("decryptor", "decryptor_used"),
    ("paid", "ransom_paid_decryption"),
    ("rebuild", "clean_rebuild"),
    ("rebuilt", "clean_rebuild"),
    ("in progress", "ongoing"),
];

/// Fases de recuperación aceptadas del payload permisivo.
pub const RECOVERY_PHASES: &[&str] = &[
    "containment",
    "eradication",
    "recovery",
    "lessons_learned",
    "post_incident_review",
];

pub const RECOVERY_PHASE_ALIASES: &[(&str, &str)] = &[
    ("contain", "containment"),
    ("eradicate", "eradication"),
    ("recover", "recovery"),
    ("lessons learned", "lessons_learned"),
    ("post incident review", "post_incident_review"),
    ("post-incident review", "post_incident_review"),
];

pub const RANSOM_CRYPTOCURRENCY_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("xmr", "monero"),
    ("eth", "ethereum"),
];

pub const SECURITY_IMPROVEMENTS: &[&str] = &[
    "mfa_implemented",
    "mfa_expanded",
    "password_policy_strengthened",
    "network_segmentation",
    "endpoint_detection_response",
    "siem_implemented",
    "soc_established",
    "backup_strategy_improved",
    "air_gapped_backups",
    "immutable_backups",
    "security_awareness_training",
    "phishing_simulation",
    "vulnerability_management",
    "penetration_testing",
    "security_audit",
    "zero_trust_initiative",
    "privileged_access_management",
    "email_security_enhanced",
    "web_filtering",
    "dns_filtering",
    "encryption_at_rest",
    "encryption_in_transit",
    "incident_response_plan_updated",
    "tabletop_exercises",
    "cyber_insurance_obtained",
    "vendor_security_review",
    "other",
];

pub const SECURITY_IMPROVEMENT_ALIASES: &[(&str, &str)] = &[
    ("mfa", "mfa_implemented"),
    ("multi-factor", "mfa_implemented"),
    ("two-factor", "mfa_implemented"),
    ("2fa", "mfa_implemented"),
    ("segmentation", "network_segmentation"),
    ("edr", "endpoint_detection_response"),
    ("siem", "siem_implemented"),
    ("soc", "soc_established"),
    ("training", "security_awareness_training"),
    ("awareness", "security_awareness_training"),
    ("penetration test", "penetration_testing"),
    ("pentest", "penetration_testing"),
    ("audit", "security_audit"),
    ("zero trust", "zero_trust_initiative"),
    ("pam", "privileged_access_management"),
    ("insurance", "cyber_insurance_obtained"),
];

// ========== TRANSPARENCIA ==========
pub const DISCLOSURE_SOURCES: &[&str] = &[
    "institution_statement",
    "media_report",
    "attacker_leak_site",
    "regulatory_filing",
    "law_enforcement",
    "social_media",
    "security_researcher",
    "other",
];

pub const TRANSPARENCY_LEVELS: &[&str] = &["excellent", "good", "adequate", "poor", "none"];

// ========== ANÁLISIS CRUZADO ==========
pub const SECTOR_TARGETING_PATTERNS: &[&str] =
    &["targeted_education_only", "opportunistic_multi_sector", "unknown"];

// ========== VULNERABILIDADES ==========
pub const VULNERABILITY_TYPES: &[&str] = &[
    "remote_code_execution",
    "privilege_escalation",
    "authentication_bypass",
    "sql_injection",
    "xss",
    "ssrf",
    "deserialization",
    "path_traversal",
    "buffer_overflow",
    "memory_corruption",
    "information_disclosure",
    "denial_of_service",
    "zero_day",
    "other",
];

/// Política para valores fuera del vocabulario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Campos escalares colapsan a `other`.
    MapToOther,
    /// Elementos de lista desconocidos se descartan.
    Drop,
}

/**
 * Coerción canónica: identidad → alias explícito → subcadena → política.
 *
 * La búsqueda por subcadena corre en ambos sentidos (el alias contenido
 * en el valor crudo) para absorber frases como "attack via phishing email".
 */
pub fn coerce_to_closed_set(
    raw_value: &str,
    allowed: &[&str],
    aliases: &[(&str, &str)],
    policy: UnknownPolicy,
) -> Option<String> {
    let candidate = raw_value.trim().to_lowercase().replace('-', "_");
    if candidate.is_empty() {
        return None;
    }

    if let Some(exact) = allowed
        .iter()
        .find(|allowed_value| allowed_value.to_lowercase() == candidate)
    {
        return Some((*exact).to_string());
    }

    let spaced = candidate.replace('_', " ");
    if let Some((_, canonical)) = aliases
        .iter()
        .find(|(alias, _)| *alias == candidate || *alias == spaced)
    {
        return Some((*canonical).to_string());
    }

    for (alias, canonical) in aliases {
        if spaced.contains(alias) {
            return Some((*canonical).to_string());
        }
    }

    match policy {
        UnknownPolicy::MapToOther if allowed.contains(&"other") => Some("other".to_string()),
        _ => None,
    }
}
