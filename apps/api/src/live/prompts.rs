// All LLM and search prompt constants for the live session.

/// System directive for the question engine. Sent as a cached system block
/// alongside the static interview context; only the transcript window varies
/// between calls.
pub const SUGGESTION_SYSTEM: &str = "You are a proficient job interviewer. \
    Identify the last topic covered in the transcript and suggest ONE relevant \
    question about it to the candidate to clarify their fit for the job. \
    Make use of the job offer, the company values and the candidate's resume \
    for maximum relevance. \
    You must return ONLY the question, without any other text. \
    KEEP IT REALLY SHORT AND TO THE POINT. \
    YOUR OUTPUT MUST BE IN THE ASCII CHARACTER SET.";

/// Builds the sourced-answer query for candidate profile extraction. The
/// search itself is domain-restricted to `url`, so the memo can only draw on
/// facts hosted at the profile.
pub fn profile_memo_query(url: &str) -> String {
    format!(
        "You are an expert recruiter. Review the profile at {url} and extract all \
        relevant professional information to create a comprehensive memo tailored \
        for recruiter review. Focus on summarizing work experience, education, key \
        skills, certifications, and notable achievements. Organize the memo into \
        clear sections (Summary, Experience, Education, Skills, Certifications, \
        Achievements) and present the information in a clean, recruiter-friendly \
        format using concise bullet points. Only extract factual information \
        present in the profile."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_query_embeds_url_and_section_names() {
        let query = profile_memo_query("https://linkedin.com/in/x");
        assert!(query.contains("https://linkedin.com/in/x"));
        for section in ["Summary", "Experience", "Education", "Skills"] {
            assert!(query.contains(section));
        }
    }
}
