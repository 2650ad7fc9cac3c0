//! Prompt builders.

use hr_trainer::{
    questions::InterviewQuestion,
    upstream::{QuestionQuery, RoleQuery},
};

pub(crate) fn questions(query: &QuestionQuery) -> String {
    let RoleQuery {
        job_title,
        location,
    } = &query.role;

    let mut prompt = format!(
        "You are a senior career coach. Using current public sources such as interview \
         reports, forums and job boards, compile {count} distinct, realistic interview \
         questions asked of a {job_title} in {location}. Favour questions that reflect the \
         local market and recent industry shifts.",
        count = query.batch_size,
    );

    if !query.exclude.is_empty() {
        prompt.push_str(
            "\n\nThe candidate already has the questions below. Do not repeat or rephrase \
             any of them, and pick different subject matter:",
        );

        for existing in &query.exclude {
            prompt.push_str("\n- ");
            prompt.push_str(existing);
        }
    }

    prompt.push_str(&format!(
        "\n\nReturn a JSON array of exactly {count} objects with `id`, `question` and \
         `category` (one of Technical, Behavioral, Case Study, Cultural).",
        count = query.batch_size,
    ));

    prompt
}

pub(crate) fn career_path(role: &RoleQuery) -> String {
    format!(
        "Build a five-year career roadmap for a {} in {}. For each year list concrete \
         milestones. Also list the skills in highest local demand and the certifications \
         that carry weight in that location.",
        role.job_title, role.location,
    )
}

pub(crate) fn salary(role: &RoleQuery) -> String {
    format!(
        "Estimate current salary bands (minimum, median, maximum) for a {} in {}, using \
         local job listings and cost-of-living data. Describe the usual bonus structure, the \
         cost-of-living adjustment and any equity or stock component.",
        role.job_title, role.location,
    )
}

pub(crate) fn networking(role: &RoleQuery) -> String {
    format!(
        "Map the networking landscape for a {} in {}: local hubs, meetup groups and \
         conferences worth attending, plus short outreach scripts for specific platforms.",
        role.job_title, role.location,
    )
}

pub(crate) fn masterclass(role: &RoleQuery, question: &InterviewQuestion) -> String {
    format!(
        "Act as an executive interview coach. Break down how to answer the interview \
         question \"{question}\" for a {job_title} in {location}.\n\
         - coreConcept: the strategy behind a winning answer, in two or three sentences.\n\
         - why: what the hiring panel is really testing.\n\
         - technicalPoints: specific points or keywords a strong answer covers.\n\
         - insiderTip: one tactic that sets top candidates apart.\n\
         - redFlags: three or four mistakes that get candidates rejected.",
        question = question.question,
        job_title = role.job_title,
        location = role.location,
    )
}

pub(crate) fn answer_evaluation(
    role: &RoleQuery,
    question: &InterviewQuestion,
    answer: &str,
) -> String {
    format!(
        "Evaluate a candidate's answer to the interview question \"{question}\" for a \
         {job_title} role.\nAnswer: \"{answer}\"\n\n\
         Give constructive feedback, a score from 0 to 10 and three key improvements. Set \
         `status` to \"pass\" when the answer is relevant, coherent and shows competence \
         (above 5 out of 10), otherwise \"fail\".",
        question = question.question,
        job_title = role.job_title,
    )
}

pub(crate) fn simulation_report(role: &RoleQuery, transcript: &[String]) -> String {
    format!(
        "Act as a senior HR director. Assess this interview transcript for a {job_title} \
         role.\n\nTranscript:\n{transcript}\n\n\
         Score it from 0 to 100 and be strict: below 60 is a fail. Summarise the \
         performance in two or three sentences, list three strengths, three specific \
         improvements and any red flags (or none).",
        job_title = role.job_title,
        transcript = transcript.join("\n"),
    )
}
