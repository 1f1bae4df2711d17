use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::slug::slugify;

/// One claim/rebuttal pair with its two code samples.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Topic {
    pub tag: &'static str,
    pub claim: &'static str,
    pub rebuttal: &'static str,
    pub nosql_sample: &'static str,
    pub sql_sample: &'static str,
}

macro_rules! mongo_sample {
    ($stem:literal) => {
        include_str!(concat!("content/samples/", $stem, ".mongo.js"))
    };
}

macro_rules! sql_sample {
    ($stem:literal) => {
        include_str!(concat!("content/samples/", $stem, ".sql"))
    };
}

pub static TOPICS: [Topic; 8] = [
    Topic {
        tag: "Dynamic Schema Needs",
        claim: "NoSQL databases allow developers to add new fields and change data structures on the fly without requiring schema migrations or downtime. This flexibility is particularly valuable during rapid development cycles or when dealing with external data sources that may change structure unexpectedly.",
        rebuttal: "PostgreSQL's JSONB type provides all the schema flexibility of a document store while maintaining ACID compliance and the power of SQL querying. Moreover, it allows you to gradually formalize your schema as your data model stabilizes, giving you the best of both worlds.",
        nosql_sample: mongo_sample!("dynamic_schema_needs"),
        sql_sample: sql_sample!("dynamic_schema_needs"),
    },
    Topic {
        tag: "Scale-Out Architecture",
        claim: "NoSQL databases are built from the ground up for horizontal scalability, making it easier to handle large-scale applications by adding more machines to the cluster. This is particularly important for applications that need to handle high write throughput.",
        rebuttal: "PostgreSQL offers multiple robust solutions for horizontal scaling, including built-in table partitioning, logical replication, and extensions like Citus that enable true distributed SQL capabilities.",
        nosql_sample: mongo_sample!("scale_out_architecture"),
        sql_sample: sql_sample!("scale_out_architecture"),
    },
    Topic {
        tag: "Complex Data Hierarchies",
        claim: "NoSQL document stores are better suited for handling deeply nested, hierarchical data structures that mirror the object structures used in application code. This makes it more natural to work with complex data models.",
        rebuttal: "PostgreSQL's combination of JSONB for flexible structures and recursive CTEs for hierarchical querying provides more powerful tools for handling complex data structures than document stores, while maintaining data integrity.",
        nosql_sample: mongo_sample!("complex_data_hierarchies"),
        sql_sample: sql_sample!("complex_data_hierarchies"),
    },
    Topic {
        tag: "Performance at Scale",
        claim: "NoSQL databases provide better performance for specific access patterns and very large datasets by sacrificing consistency guarantees and complex querying capabilities.",
        rebuttal: "PostgreSQL's sophisticated query planner, extensive indexing options, and materialized views often provide better performance than NoSQL solutions while maintaining ACID compliance. For specific access patterns, specialized indexes like BRIN, GiST, and GIN can outperform NoSQL solutions.",
        nosql_sample: mongo_sample!("performance_at_scale"),
        sql_sample: sql_sample!("performance_at_scale"),
    },
    Topic {
        tag: "Developer Experience",
        claim: "NoSQL databases provide a more natural development experience by allowing developers to store data in the same format as their application objects, reducing the need for complex object-relational mapping.",
        rebuttal: "Modern PostgreSQL features like JSONB, composite types, and array types provide the same developer convenience while maintaining data integrity. Additionally, tools like PostgREST can automatically generate REST APIs from your database schema.",
        nosql_sample: mongo_sample!("developer_experience"),
        sql_sample: sql_sample!("developer_experience"),
    },
    Topic {
        tag: "Geographic Distribution",
        claim: "NoSQL databases handle globally distributed deployments better, with built-in support for eventual consistency and multi-master replication across regions.",
        rebuttal: "PostgreSQL's logical replication, combined with extensions like BDR (Bi-Directional Replication) and Citus, provides sophisticated multi-region deployment options with tunable consistency levels and conflict resolution strategies.",
        nosql_sample: mongo_sample!("geographic_distribution"),
        sql_sample: sql_sample!("geographic_distribution"),
    },
    Topic {
        tag: "Real-World Performance",
        claim: "NoSQL databases are necessary for high-performance applications and large-scale deployments. Traditional SQL databases can't handle the load of modern web-scale applications.",
        rebuttal: "PostgreSQL powers some of the world's largest applications. Instagram uses PostgreSQL to handle 1+ billion users and 100+ million photos/videos daily. Uber's deployment handles 10+ million writes per second. Reddit, Twitch, and Apple's iCloud all rely on PostgreSQL for core functionality. Benchmarks consistently show PostgreSQL matching or outperforming MongoDB in read operations and ACID-compliant writes.",
        nosql_sample: mongo_sample!("real_world_performance"),
        sql_sample: sql_sample!("real_world_performance"),
    },
    Topic {
        tag: "Enterprise Support",
        claim: "NoSQL databases offer better enterprise support and commercial backing. Organizations need professional support for mission-critical deployments.",
        rebuttal: "PostgreSQL has a robust enterprise support ecosystem. Major providers include EDB, AWS (RDS), Google Cloud (CloudSQL), Azure, Crunchy Data, and 2ndQuadrant. These offer 24/7 support, security patches, monitoring, and high availability solutions. The PostgreSQL community includes major corporations and thousands of active developers, ensuring long-term stability.",
        nosql_sample: mongo_sample!("enterprise_support"),
        sql_sample: sql_sample!("enterprise_support"),
    },
];

pub static SITE_TITLE: &str = "No, SQL";
pub static SITE_TAGLINE: &str = "Why PostgreSQL is probably the answer to your NoSQL needs";
pub static CLAIM_HEADING: &str = "The Claim:";
pub static REBUTTAL_HEADING: &str = "The Reality:";
pub static SAMPLES_HEADING: &str = "Show me the code:";
pub static NOSQL_SAMPLE_TITLE: &str = "NoSQL Approach";
pub static SQL_SAMPLE_TITLE: &str = "PostgreSQL Solution";
pub static FOOTER_NOTE: &str = "No, SQL! - Use the right tool, not the shiny one";
pub static FOOTER_AUTHOR: &str = "Earl St Sauver";
pub static FOOTER_AUTHOR_URL: &str = "https://estsauver.com";

/// Topic sequence with its slugs derived once at load time.
pub struct Catalog {
    topics: &'static [Topic],
    slugs: Vec<String>,
}

impl Catalog {
    /// Loads the compiled-in topics, deriving one slug per topic.
    pub fn load() -> Result<Self, ContentError> {
        Self::from_topics(&TOPICS)
    }

    /// Derives slugs for `topics` and checks them for collisions.
    ///
    /// Reverse resolution silently picks the first match, so two tags
    /// collapsing to the same slug would shadow each other; loading fails
    /// instead.
    pub fn from_topics(topics: &'static [Topic]) -> Result<Self, ContentError> {
        let slugs: Vec<String> = topics.iter().map(|topic| slugify(topic.tag)).collect();
        for (index, slug) in slugs.iter().enumerate() {
            if let Some(earlier) = slugs[..index].iter().position(|candidate| candidate == slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: slug.clone(),
                    first_tag: topics[earlier].tag,
                    second_tag: topics[index].tag,
                });
            }
        }
        Ok(Self { topics, slugs })
    }

    pub fn topics(&self) -> &'static [Topic] {
        self.topics
    }

    pub fn topic(&self, index: usize) -> Option<&'static Topic> {
        self.topics.get(index)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Slug of the topic at `index`.
    pub fn slug(&self, index: usize) -> Option<&str> {
        self.slugs.get(index).map(String::as_str)
    }

    /// Index of the topic whose slug equals `fragment`.
    ///
    /// `None` is a regular outcome, not an error: unrelated fragments are
    /// expected input.
    pub fn resolve(&self, fragment: &str) -> Option<usize> {
        self.slugs.iter().position(|slug| slug == fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    DuplicateSlug {
        slug: String,
        first_tag: &'static str,
        second_tag: &'static str,
    },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSlug { slug, first_tag, second_tag } => write!(
                f,
                "topics {first_tag:?} and {second_tag:?} share the slug {slug:?}",
            ),
        }
    }
}

impl Error for ContentError {}
