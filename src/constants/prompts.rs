pub const EDUCATOR_PREAMBLE: &str = "You are an expert educator creating quiz material for college students.";

pub const TOPIC_EXTRACTION_RULES: &str = "Your task is to list the distinct topics of taught content in the course syllabus below, one entry per week or unit, in the order they appear in the document.

## RULES

- Each topic is a short human-readable label, for example \"Week 1: Newton's Laws\".
- Only include weeks or sessions where course content is actually taught.
- EXCLUDE non-content weeks: breaks, holidays, reading weeks, cancelled sessions, review sessions without new material, and exam or administrative weeks.
- An exam week is only included if it explicitly names a topic that is examined; in that case label it with that topic.
- Do not invent topics that are not in the syllabus.
- If the syllabus contains no taught content, return an empty array.

## OUTPUT FORMAT

Return ONLY a JSON array of strings. No prose, no markdown, no extra keys.
Example: [\"Week 1: Newton's Laws\", \"Week 2: Energy and Work\"]";

pub const QUIZ_CONTENT_RULES: &str = "## IMPORTANT

- DO NOT generate questions ABOUT the syllabus itself (e.g. \"What topic is covered in Week 1?\").
- DO generate questions that test understanding of the concepts, principles and techniques the syllabus says are taught.
- Questions should test conceptual understanding, problem-solving and application, not recall of the schedule.
- Each question has exactly four options labelled A, B, C and D, and exactly one correct option.
- Distractors must be plausible to a student who has partially understood the material.
- For quantitative subjects, write mathematics with inline $...$ or block $$...$$ markup.";

pub const QUIZ_OUTPUT_CONTRACT: &str = "## OUTPUT FORMAT

Return ONLY a JSON array. No prose, no markdown, no extra keys.
Each element is an object with exactly these fields:
- id: integer, sequential starting at 1
- question: string, the question text
- options: object with exactly the keys \"A\", \"B\", \"C\", \"D\", each mapping to the option text
- answer: string, one of \"A\", \"B\", \"C\", \"D\", the key of the correct option

Example:
[{\"id\": 1, \"question\": \"...\", \"options\": {\"A\": \"...\", \"B\": \"...\", \"C\": \"...\", \"D\": \"...\"}, \"answer\": \"B\"}]";

pub const EXPLANATION_RULES: &str = "Write a concise explanation of 2-4 sentences that:
- explains why the correct answer is right, and
- explains why the student's answer is a plausible but mistaken choice.
Address the student directly and keep any mathematics in $...$ markup.

## OUTPUT FORMAT

Return ONLY a JSON object with a single field, no prose and no markdown:
{\"explanation\": \"...\"}";

pub const RECENT_MATERIAL_SCOPE: &str = "the most recently covered material";
