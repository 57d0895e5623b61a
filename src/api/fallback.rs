//! Offline stand-ins used when the backend can't be reached.
//!
//! Nothing here is a real analysis. The keyword rules only exist so the
//! common demo claims produce stable answers without a backend.

use std::time::Duration;

use rand::{seq::SliceRandom, Rng};

use crate::models::{Citation, NewsArticle, Verdict, VerificationResult};

pub const FALLBACK_MODEL: &str = "offline heuristic";
pub const MIN_FALLBACK_ARTICLES: usize = 5;
pub const MAX_FALLBACK_ARTICLES: usize = 7;

const VACCINE_AUTISM_EXPLANATION: &str = "Extensive research involving millions of children has found no link between vaccines and autism. \
The 1998 paper that proposed a connection was retracted after serious ethical violations and data manipulation came to light. \
The WHO, the CDC and other major health authorities confirm that vaccines are safe and do not cause autism.";

const LEMON_EXPLANATION: &str = "Lemons provide vitamin C and antioxidants, but there is no good evidence that lemon water cures disease or detoxifies the body. \
Some small studies suggest modest benefits for hydration and vitamin C intake. \
The claim needs more context before it can be rated, and a healthcare professional should be consulted for medical concerns.";

const TRUE_EXPLANATION: &str = "Based on current medical literature and trusted health sources, this claim appears to be supported by scientific evidence. \
Consult a healthcare professional for advice specific to your situation.";

const NEEDS_REVIEW_EXPLANATION: &str = "The available evidence for this claim is limited or conflicting, so it can't be rated with confidence yet. \
Check several trusted medical sources and consult a healthcare professional.";

fn citation(title: &str, source: &str, url: &str, published_at: &str) -> Citation {
    Citation {
        title: title.to_string(),
        source: source.to_string(),
        url: url.to_string(),
        published_at: Some(published_at.to_string()),
        summary: None,
    }
}

fn vaccine_autism_citations() -> Vec<Citation> {
    vec![
        citation(
            "Vaccines and immunization: Myths and misconceptions",
            "WHO",
            "https://www.who.int/news-room/questions-and-answers/item/vaccines-and-immunization-myths-and-misconceptions",
            "2020-10-19",
        ),
        citation(
            "Autism and Vaccines",
            "CDC",
            "https://www.cdc.gov/vaccine-safety/about/autism.html",
            "2024-12-30",
        ),
    ]
}

fn lemon_citations() -> Vec<Citation> {
    vec![citation(
        "Vitamin C: Fact Sheet for Health Professionals",
        "NIH",
        "https://ods.od.nih.gov/factsheets/VitaminC-HealthProfessional/",
        "2021-03-26",
    )]
}

fn general_citations() -> Vec<Citation> {
    vec![
        citation(
            "Health topics",
            "WHO",
            "https://www.who.int/health-topics",
            "2024-01-15",
        ),
        citation(
            "Health Topics A-Z",
            "CDC",
            "https://www.cdc.gov/health-topics.html",
            "2024-02-01",
        ),
        citation(
            "PubMed: biomedical literature search",
            "PubMed",
            "https://pubmed.ncbi.nlm.nih.gov/",
            "2024-03-10",
        ),
    ]
}

/// Offline verdict for `input`. `delay` is reported as the processing time.
pub fn verification_result<R: Rng>(
    input: &str,
    delay: Duration,
    rng: &mut R,
) -> VerificationResult {
    let lowered = input.to_lowercase();

    let (verdict, confidence, explanation, citations) =
        if lowered.contains("vaccine") && lowered.contains("autism") {
            (
                Verdict::Misleading,
                95.0,
                VACCINE_AUTISM_EXPLANATION.to_string(),
                vaccine_autism_citations(),
            )
        } else if lowered.contains("lemon") {
            (
                Verdict::NeedsReview,
                72.0,
                LEMON_EXPLANATION.to_string(),
                lemon_citations(),
            )
        } else {
            let verdict = *[Verdict::True, Verdict::NeedsReview]
                .choose(rng)
                .unwrap_or(&Verdict::NeedsReview);
            let confidence = f64::from(rng.gen_range(60u32..95));
            let explanation = match verdict {
                Verdict::True => TRUE_EXPLANATION,
                _ => NEEDS_REVIEW_EXPLANATION,
            };
            let pool = general_citations();
            let count = rng.gen_range(1..=pool.len());
            let citations = pool.choose_multiple(rng, count).cloned().collect();
            (verdict, confidence, explanation.to_string(), citations)
        };

    VerificationResult {
        verdict,
        confidence,
        explanation,
        citations,
        language: Some("English".to_string()),
        model: Some(FALLBACK_MODEL.to_string()),
        processing_time: Some(format!("{:.1}s", delay.as_secs_f64())),
        timestamp: None,
    }
}

fn article(
    id: &str,
    title: &str,
    summary: &str,
    url: &str,
    published_at: &str,
    source: &str,
) -> NewsArticle {
    NewsArticle {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        url: url.to_string(),
        published_at: published_at.to_string(),
        source: source.to_string(),
    }
}

pub fn fixture_articles() -> Vec<NewsArticle> {
    vec![
        article(
            "fixture-who-influenza",
            "WHO publishes recommended composition of seasonal influenza vaccines",
            "Annual recommendations guide vaccine manufacturers on which influenza strains to target for the coming season.",
            "https://www.who.int/news",
            "2024-02-23T09:00:00Z",
            "WHO",
        ),
        article(
            "fixture-cdc-measles",
            "CDC urges measles vaccination ahead of travel season",
            "Health officials remind travellers to make sure they are up to date on MMR vaccination before international trips.",
            "https://www.cdc.gov/media/index.html",
            "2024-03-18T14:30:00Z",
            "CDC",
        ),
        article(
            "fixture-pubmed-activity",
            "Regular physical activity linked to lower cardiovascular risk",
            "A large cohort study reports that moderate weekly exercise is associated with reduced heart disease incidence.",
            "https://pubmed.ncbi.nlm.nih.gov/",
            "2024-03-02T08:15:00Z",
            "PubMed",
        ),
        article(
            "fixture-who-amr",
            "Global report tracks progress against antimicrobial resistance",
            "New surveillance data show where resistance to common antibiotics is rising and which interventions are working.",
            "https://www.who.int/health-topics/antimicrobial-resistance",
            "2024-01-29T11:00:00Z",
            "WHO",
        ),
        article(
            "fixture-cdc-heat",
            "Preventing heat-related illness during extreme temperatures",
            "Guidance covers hydration, recognising heat exhaustion, and protecting older adults and children during heat waves.",
            "https://www.cdc.gov/heat-health/",
            "2024-04-05T16:45:00Z",
            "CDC",
        ),
    ]
}

/// Shuffled fixture articles, truncated to a random count between
/// [`MIN_FALLBACK_ARTICLES`] and [`MAX_FALLBACK_ARTICLES`].
pub fn news_articles<R: Rng>(rng: &mut R) -> Vec<NewsArticle> {
    let mut articles = fixture_articles();
    articles.shuffle(rng);
    let count = rng.gen_range(MIN_FALLBACK_ARTICLES..=MAX_FALLBACK_ARTICLES);
    articles.truncate(count);
    articles
}
