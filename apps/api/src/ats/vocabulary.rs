//! Fixed word tables used by keyword extraction and section analysis.

/// Function words dropped before keyword counting.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "will", "with", "i", "you", "your",
    "we", "they", "them", "their", "this", "but", "have", "had", "what", "when", "where", "who",
    "which", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "can",
    "just", "should", "now", "would", "could", "may", "might", "must", "shall", "our", "ours",
    "us", "were", "been", "being", "into", "about", "also", "across", "within", "over",
    "using", "etc", "per", "via", "including", "while", "there", "these", "those",
];

/// Hyphenated or joined domain terms and the spaced form free text usually uses.
/// Matched case-insensitively on word boundaries.
pub const COMPOUND_TERMS: &[(&str, &str)] = &[
    ("full-stack", "full stack"),
    ("fullstack", "full stack"),
    ("front-end", "front end"),
    ("back-end", "back end"),
    ("devops", "dev ops"),
    ("dev-ops", "dev ops"),
    ("end-to-end", "end to end"),
    ("real-time", "real time"),
    ("cross-functional", "cross functional"),
    ("object-oriented", "object oriented"),
    ("data-driven", "data driven"),
    ("event-driven", "event driven"),
    ("test-driven", "test driven"),
    ("results-driven", "results driven"),
    ("detail-oriented", "detail oriented"),
    ("machine-learning", "machine learning"),
    ("deep-learning", "deep learning"),
    ("open-source", "open source"),
    ("cloud-native", "cloud native"),
    ("micro-services", "micro services"),
    ("ci/cd", "ci cd"),
    ("ci-cd", "ci cd"),
    ("on-call", "on call"),
    ("high-availability", "high availability"),
    ("low-latency", "low latency"),
    ("large-scale", "large scale"),
    ("fault-tolerant", "fault tolerant"),
    ("user-facing", "user facing"),
    ("customer-facing", "customer facing"),
    ("problem-solving", "problem solving"),
    ("hands-on", "hands on"),
    ("self-motivated", "self motivated"),
    ("e-commerce", "e commerce"),
    ("no-sql", "no sql"),
];

/// Technical skills, tested by substring containment.
pub const TECHNICAL_TERMS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "node.js",
    "sql",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "html",
    "css",
    "typescript",
    "angular",
    "vue",
    "express",
    "django",
    "flask",
    "spring",
    "hibernate",
    "postgresql",
    "mysql",
    "redis",
    "elasticsearch",
    "kafka",
    "rabbitmq",
    "jenkins",
    "ci/cd",
    "agile",
    "scrum",
    "kanban",
    "rest",
    "graphql",
    "microservices",
    "api",
    "frontend",
    "backend",
    "fullstack",
    "devops",
    "cloud",
    "serverless",
    "lambda",
    "ec2",
    "s3",
    "rds",
    "elastic",
    "terraform",
    "ansible",
];

/// Seniority and role titles.
pub const EXPERIENCE_TERMS: &[&str] = &[
    "experience",
    "years",
    "senior",
    "junior",
    "lead",
    "manager",
    "developer",
    "engineer",
    "architect",
    "consultant",
    "specialist",
    "analyst",
    "coordinator",
    "supervisor",
    "director",
    "vp",
    "cto",
    "ceo",
    "founder",
    "co-founder",
];

/// Credentials and summary-style claims.
pub const SUMMARY_TERMS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "certification",
    "certified",
    "expertise",
    "proficient",
    "skilled",
    "knowledgeable",
    "experienced",
    "proven",
    "track record",
    "successful",
    "results",
    "achieved",
    "delivered",
];
