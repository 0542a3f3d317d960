//! Prompt builders for the three LLM flows. Pure string assembly — input
//! validation is the caller's responsibility.

/// System prompt for the analyze flow.
pub const ANALYSIS_SYSTEM: &str =
    "You are a helpful assistant that analyzes resumes against job descriptions.";

/// System prompt for the suggestions flow.
pub const SUGGESTIONS_SYSTEM: &str = "You provide resume improvement suggestions.";

/// Builds the analysis prompt. The three heading directives must stay verbatim
/// — `parser::extract_section` anchors on them.
pub fn analysis_prompt(resume_text: &str, job_description: &str, linkedin_url: &str) -> String {
    format!(
        "\
Analyze the following resume, LinkedIn profile, and job description.

Resume:
{resume_text}

LinkedIn:
{linkedin_url}

Job Description:
{job_description}

Please provide the following:
1. A detailed analysis of the resume.
2. Percentage match for each category: experience, skills, education, and certifications.
3. An overall confidence score (0-100%) indicating how well the candidate fits the position.

Return the response structured clearly with these headings:
Analysis:
Match Percentage:
Confidence Score:
"
    )
}

/// Builds the suggestions prompt, demanding strictly a JSON array of strings
/// and appending ATS keyword-optimization guidance.
pub fn suggestions_prompt(resume_text: &str, job_description: &str, linkedin_url: &str) -> String {
    format!(
        "\
You are a helpful career consultant.

Based on the following resume, LinkedIn profile, and job description, provide a concise list of actionable suggestions
to improve the resume so it better matches the job requirements.

Resume:
{resume_text}

Job Description:
{job_description}

LinkedIn profile:
{linkedin_url}

Return ONLY a JSON array of suggestion strings, with no surrounding quotes or markdown formatting. Do not include any extra text or explanation.
Please also analyse and suggest improvements to the CV, considering it should help getting the recruiter's attention and passing by automatic triage systems (ATS) using keywords based on the profile and an structure which facilitates HR automatized reading systems.
Example:
[
    \"Suggestion 1\",
    \"Suggestion 2\",
    \"Suggestion 3\"
]
"
    )
}

/// Builds the cover-letter prompt with an explicit instruction not to
/// fabricate information absent from the resume.
pub fn cover_letter_prompt(resume_text: &str, job_description: &str, linkedin_url: &str) -> String {
    format!(
        "\
You are a helpful assistant generating a professional, honest cover letter for a job applicant for the below job description.

Use ONLY the following resume information and LinkedIn URL (do NOT invent or assume anything):

Resume:
{resume_text}

LinkedIn URL:
{linkedin_url}

Job Description:
{job_description}

Generate a concise, positive cover letter that highlights relevant skills and experience from the resume. Do not invent any information. The letter should be tailored to the job but keep it truthful.

Cover Letter:
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_requests_exact_headings() {
        let prompt = analysis_prompt("resume body", "job body", "");
        assert!(prompt.contains("Analysis:"));
        assert!(prompt.contains("Match Percentage:"));
        assert!(prompt.contains("Confidence Score:"));
        assert!(prompt.contains("resume body"));
        assert!(prompt.contains("job body"));
    }

    #[test]
    fn test_suggestions_prompt_demands_json_array() {
        let prompt = suggestions_prompt("resume body", "job body", "https://li");
        assert!(prompt.contains("ONLY a JSON array"));
        assert!(prompt.contains("ATS"));
        assert!(prompt.contains("https://li"));
    }

    #[test]
    fn test_cover_letter_prompt_forbids_invention() {
        let prompt = cover_letter_prompt("resume body", "job body", "");
        assert!(prompt.contains("Do not invent any information."));
        assert!(prompt.contains("Cover Letter:"));
    }
}
