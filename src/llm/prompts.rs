// src/llm/prompts.rs
// Prompt templates for the outreach pipeline. Placeholders are `{name}` and are filled
// with `str::replace` so JSON braces in the payload are never interpreted.

pub const EXTRACT_JOBS_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}
### INSTRUCTION:
The scraped text is from the career's page of a website.
Your job is to extract the job posting and return it in JSON format containing the following keys: `role`, `experience`, `skills` and `description`.
If the job title is not explicitly mentioned in the skills or description, include it in the `role` field.
Only return the valid JSON.
### VALID JSON (NO PREAMBLE):"#;

pub const EXTRACT_SKILLS_TEMPLATE: &str = r#"### PDF TEXT:
{pdf_text}
### INSTRUCTION:
Carefully analyze the provided PDF text, which is extracted from a resume. Your task is to extract all skills and projects mentioned in the text.

For skills:
- Include both technical skills (programming languages, frameworks, tools) and soft skills.
- List each skill separately.

For projects:
- Extract any mentioned projects or significant work experiences.
- Include a brief description for each project if available.

Return the extracted information in JSON format with the keys: `skills` (an array of strings) and `projects` (an array of objects, each with a `name` and a brief `description`).

### VALID JSON (NO PREAMBLE):"#;

pub const COLD_EMAIL_TEMPLATE: &str = r#"### JOB DETAILS:
{job_details}

### YOUR SKILLS AND PROJECTS:
{portfolio_items}

### INSTRUCTION:
You are an aspiring software engineer writing a cold email to apply for the job role mentioned above. Your task is to write a compelling 200-word cold email that showcases your skills and experiences, focusing on the following:

1. Create a concise subject line for the email using the job role.
2. Introduce yourself briefly as an aspiring software engineer. Keep the email tone like a student wrote it; don't make it too perfect.
3. Express your enthusiasm for the specific role, mentioning the role title explicitly.
4. List your own skills from the portfolio/resume that align with the role in bulleted points.
5. State that while you may not have all the skills listed in the job description, you are eager and committed to learning them if required.
6. Provide a very brief summary of 1-2 of your most relevant projects, emphasizing how they align with your existing skills.
7. Conclude with a statement about your eagerness to contribute to the company and grow in your field.
8. Close with a call to action, such as requesting an interview or further discussion.

Ensure that you do not include skills from the job description that are not listed in the portfolio. Instead, mention your willingness to learn.

### EMAIL (INCLUDING SUBJECT LINE):"#;

pub const LINKEDIN_MESSAGE_TEMPLATE: &str = r#"### JOB DETAILS:
{job_details}

### YOUR SKILLS AND PROJECTS:
{portfolio_items}

### INSTRUCTION:
Write a brief LinkedIn message to apply for the job role.
- Use an approachable and professional tone.
- Keep the message under 100 words.
- Mention the role and highlight 2 key skills or experiences.
- End with a call to action for a follow-up or further discussion.
### MESSAGE:"#;

pub fn extract_jobs_prompt(page_data: &str) -> String {
    EXTRACT_JOBS_TEMPLATE.replace("{page_data}", page_data)
}

pub fn extract_skills_prompt(pdf_text: &str) -> String {
    EXTRACT_SKILLS_TEMPLATE.replace("{pdf_text}", pdf_text)
}

pub fn cold_email_prompt(job_details: &str, portfolio_items: &str) -> String {
    fill_outreach(COLD_EMAIL_TEMPLATE, job_details, portfolio_items)
}

pub fn linkedin_message_prompt(job_details: &str, portfolio_items: &str) -> String {
    fill_outreach(LINKEDIN_MESSAGE_TEMPLATE, job_details, portfolio_items)
}

// Portfolio first: job text could itself contain "{portfolio_items}"
fn fill_outreach(template: &str, job_details: &str, portfolio_items: &str) -> String {
    template
        .replace("{portfolio_items}", portfolio_items)
        .replace("{job_details}", job_details)
}
