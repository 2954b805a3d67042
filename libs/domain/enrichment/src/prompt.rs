// [libs/domain/enrichment/src/prompt.rs]
/*!
 * =================================================================
 * APARATO: EXTRACTION PROMPT FORGE (V4.1)
 * CLASIFICACIÓN: DOMAIN LAYER (ESTRATO L2)
 * RESPONSABILIDAD: CONSTRUCCIÓN DEL PROMPT RESTRINGIDO POR ESQUEMA
 * =================================================================
 */

use crate::schema::EXTRACTION_SCHEMA;

/// Instrucción de sistema: JSON puro, sin prosa ni cercas.
pub const SYSTEM_PROMPT: &str = "You are a Cyber Threat Intelligence Analyst. \
Output ONLY valid JSON matching the provided schema. \
No prose, no explanations, no markdown - pure JSON only.";

const PROMPT_HEADER: &str = r#"You are a Senior Cyber Threat Intelligence (CTI) Analyst specializing in educational sector cyber incidents. Your role is to analyze news articles and extract COMPREHENSIVE threat intelligence data for cross-incident analysis and sector-wide threat assessment.

YOUR TASK:
Extract detailed CTI information from the article and output a valid JSON object matching the schema. This data will be used for:
- Threat actor tracking and attribution
- Attack pattern analysis across the education sector
- Incident correlation and campaign identification
- Regulatory and compliance assessment
- Financial impact analysis

CRITICAL OUTPUT REQUIREMENTS:

1. EDUCATION RELEVANCE (MANDATORY FIRST ANALYSIS):
   - is_edu_cyber_incident: Set to true ONLY if the incident involves an educational institution
     (university, college, school, school district, research institute, etc.)
   - education_relevance_reasoning: Provide a 1-2 sentence explanation WHY this is or isn't
     education-related, citing specific evidence from the article

2. OUTPUT FORMAT:
   - Output ONLY valid JSON matching the JSON Schema below
   - No prose, explanations, or markdown formatting
   - No code blocks or backticks

3. NULL VALUES FOR UNKNOWN INFORMATION:
   - If information is NOT mentioned in the article, set the field to null
   - Do NOT guess, assume, or infer values
   - Boolean fields: use null if not mentioned (NOT false)
   - Array fields: use null if no items found (NOT empty array [])
   - Number fields: use null if not mentioned (NOT 0)

4. ENUMERATED FIELDS:
   - Use the EXACT lowercase tags defined by the schema enums
   - Select the MOST SPECIFIC category that applies

5. STANDARDIZED NUMERIC VALUES:
   - Convert ALL monetary amounts to USD numbers:
     * "$4.75 million" -> 4750000
     * "5.2M dollars" -> 5200000
   - Durations to hours OR days as specified by the field name
   - User counts as integers: "45,000 students" -> 45000

6. DATE FORMATTING:
   - All dates MUST be in ISO format: YYYY-MM-DD
   - Use null for unknown dates (NOT made-up dates)

7. CROSS-INCIDENT ANALYSIS:
   - attack_campaign_name: if part of a known campaign (e.g., "MOVEit", "PaperCut")
   - sector_targeting_pattern: "targeted_education_only" or "opportunistic_multi_sector"

JSON SCHEMA:

"#;

const PROMPT_FOOTER: &str = r#"

---

EXTRACTION GUIDELINES:
- Be COMPREHENSIVE - extract every piece of threat intelligence mentioned
- Use the MOST SPECIFIC enum value available
- For multi-stage attacks, capture the full attack chain
- Note relationships to other incidents or campaigns
- Extract IOCs (IP addresses, domains, hashes) if mentioned
- Capture recovery timeline and security improvements

Output ONLY the JSON object, no other text."#;

/// Ensambla el prompt de usuario con esquema, URL, título y texto.
pub fn build_user_prompt(url: &str, title: &str, article_text: &str) -> String {
    let schema_rendered = serde_json::to_string_pretty(&*EXTRACTION_SCHEMA)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "{header}{schema}\n\nARTICLE INFORMATION:\n\n- URL: {url}\n- Title: {title}\n\nARTICLE CONTENT:\n\n{text}{footer}",
        header = PROMPT_HEADER,
        schema = schema_rendered,
        url = url,
        title = title,
        text = article_text,
        footer = PROMPT_FOOTER,
    )
}
