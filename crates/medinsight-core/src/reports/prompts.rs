//! Instruction prompts per report kind.

use medinsight_types::{CarePreferences, HospitalConfig, PatientInfo, ReportKind};

const XRAY_PROMPT: &str = "\
You are an expert radiologist. Analyze this X-ray image and write a structured diagnostic report with these sections:

1. **Image Quality**: quality of the image and patient positioning
2. **Findings**: anatomical structures seen and any abnormalities
3. **Impression**: short summary of the key findings
4. **Recommendations**: follow-up actions or further imaging, if any

State that this is an AI-generated preliminary analysis that a qualified healthcare professional must review.";

const CT_SCAN_PROMPT: &str = "\
You are an expert radiologist specializing in CT imaging. Analyze this CT scan and write a clinical report with these sections:

1. **Technical Information**: scan type, slice orientation, contrast use if visible
2. **Anatomical Region**: the body region scanned
3. **Findings**: visible structures, densities and any abnormalities
4. **Measurements**: relevant sizes or measurements
5. **Clinical Impression**: summary interpretation
6. **Recommendations**: follow-up or additional investigations

State that this is an AI-generated preliminary analysis that a certified radiologist must validate.";

const ULTRASOUND_PROMPT: &str = "\
You are an expert sonographer and radiologist. Analyze this ultrasound image and write a diagnostic summary with these sections:

1. **Examination Type**: the anatomical region examined
2. **Image Quality**: clarity and adequacy of the image
3. **Findings**: visible structures, echogenicity patterns and any abnormalities
4. **Measurements**: organ sizes or lesion dimensions where relevant
5. **Doppler Information**: blood flow, if color Doppler is present
6. **Impression**: concise summary
7. **Recommendations**: follow-up or additional studies

State that this is an AI-generated preliminary assessment that a licensed healthcare professional must confirm.";

const REPORT_ANALYSIS_PROMPT: &str = "\
Analyze this medical imaging report and extract the key information.

MEDICAL REPORT:
{report}

Answer in exactly this format:
1. REPORT TYPE: (X-ray/CT Scan/MRI/Ultrasound)
2. ANATOMICAL REGION: (body part)
3. KEY FINDINGS: (main findings)
4. SEVERITY: (Normal/Mild/Moderate/Severe/Critical)
5. ABNORMALITIES DETECTED: (list them, or \"None\")
6. RECOMMENDED SPECIALTIES: (specialists needed)
7. URGENCY LEVEL: (Routine/Urgent/Emergency)
8. TREATMENT IMPLICATIONS: (kind of care likely needed)

Be specific and use medical terminology.";

const RECOMMENDATION_PROMPT: &str = "\
Based on this medical report analysis, recommend the TOP 3-4 best hospitals{region}.

REPORT ANALYSIS:
{analysis}

PATIENT INFO:
- Age: {age}
- Gender: {gender}
- Budget: {budget}
- Emergency Case: {emergency}
{directory}
Recommend hospitals that best match the patient's condition, budget and requirements. Consider every hospital equally, without special priority.

For EACH recommended hospital, provide:
- HOSPITAL NAME, rating and review count, and hospital type (government or private)
- Why this hospital is best for this case: reasons tied to the findings, relevant specialties and equipment
- Treatment approach: expected diagnostics, specialist consultations, treatment protocol
- Cost breakdown in INR: consultation, diagnostic tests, total estimate, insurance or cashless options
- Timeline: time to diagnosis and treatment duration
- Contact: phone, address and availability

Rank by: 1) condition relevance, 2) budget fit, 3) success rate, 4) patient reviews, 5) hospital ratings.";

/// Prompt asking for hospitals that suit an analysed report.
pub fn recommendation_prompt(
    analysis: &str,
    patient: &PatientInfo,
    preferences: &CarePreferences,
    hospitals: &HospitalConfig,
) -> String {
    let or_unknown = |value: &Option<String>| {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty()).unwrap_or("Not provided").to_string()
    };
    let region = hospitals.region().map(|r| format!(" in {}", r)).unwrap_or_default();
    let directory = hospitals
        .directory()
        .map(|d| format!("\nAVAILABLE HOSPITALS:\n{}\n", d))
        .unwrap_or_default();

    RECOMMENDATION_PROMPT
        .replace("{region}", &region)
        .replace("{age}", &or_unknown(&patient.age))
        .replace("{gender}", &or_unknown(&patient.gender))
        .replace("{budget}", preferences.budget_or_default())
        .replace("{emergency}", if preferences.emergency { "Yes" } else { "No" })
        .replace("{directory}", &directory)
        .replace("{analysis}", analysis.trim())
}

/// Build the prompt for `kind`. `report_text` is only used by text analysis.
pub fn prompt_for(kind: ReportKind, report_text: Option<&str>) -> String {
    match kind {
        ReportKind::Xray => XRAY_PROMPT.to_string(),
        ReportKind::CtScan => CT_SCAN_PROMPT.to_string(),
        ReportKind::Ultrasound => ULTRASOUND_PROMPT.to_string(),
        ReportKind::ReportAnalysis => {
            REPORT_ANALYSIS_PROMPT.replace("{report}", report_text.unwrap_or_default().trim())
        },
    }
}
