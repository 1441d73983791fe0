//! Sample posts used to seed a fresh store or data API.

use chrono::{NaiveDate, TimeZone, Utc};

use quill_core::domain::{Post, PostDraft};

struct Sample {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    excerpt: &'static str,
    content: &'static str,
    author: &'static str,
    date: (i32, u32, u32),
}

const SAMPLES: [Sample; 6] = [
    Sample {
        id: "1",
        title: "GPT-5 Architecture Reveals Breakthrough in Reasoning",
        category: "AI",
        excerpt: "New multi-modal architecture shows unprecedented capabilities in logical reasoning and mathematical problem solving.",
        content: r#"Researchers have unveiled a revolutionary architecture that fundamentally changes how AI models approach reasoning tasks. The new system combines symbolic reasoning with neural networks, achieving 98% accuracy on complex mathematical proofs.

The breakthrough lies in its ability to maintain logical consistency across long reasoning chains while dynamically adjusting its approach based on problem complexity. This hybrid approach bridges the gap between traditional symbolic AI and modern deep learning.

Early benchmarks show the system outperforming previous models by 40% on standardized reasoning tests while using 30% less computational resources. The implications for scientific research and automated theorem proving are significant."#,
        author: "DeepTech Research",
        date: (2025, 1, 15),
    },
    Sample {
        id: "2",
        title: "Humanoid Robots Achieve Human-Level Dexterity",
        category: "Robotics",
        excerpt: "Latest generation of bipedal robots demonstrate fine motor control matching human hands in manufacturing tasks.",
        content: r#"A major milestone in robotics has been achieved with humanoid robots now capable of performing delicate assembly tasks previously requiring human workers. The breakthrough comes from advances in tactile sensing and real-time force feedback systems.

These robots use a combination of vision-based learning and proprioceptive sensors to manipulate objects with precision down to 0.1mm. The system learns from demonstration and can adapt to new tasks within hours rather than weeks of programming.

Manufacturing facilities testing these systems report 99.7% accuracy in assembly tasks with the robots working continuously for 20-hour shifts. The technology promises to revolutionize industries requiring precision manual labor."#,
        author: "Robotics Institute",
        date: (2025, 1, 10),
    },
    Sample {
        id: "3",
        title: "Brain-Computer Interface Enables Natural Speech",
        category: "Neurology",
        excerpt: "Paralyzed patients communicate at 80 words per minute using thoughts alone through next-gen neural implants.",
        content: r#"A revolutionary brain-computer interface has enabled paralyzed patients to communicate naturally at speeds approaching normal conversation. The system decodes neural signals directly from the speech motor cortex with unprecedented accuracy.

Unlike previous systems that required letter-by-letter selection, this technology interprets intended phonemes and words directly from brain activity. Machine learning algorithms trained on thousands of hours of neural recordings can now predict intended speech with 95% accuracy.

Clinical trials involving 12 patients show consistent performance over 6 months with no degradation in signal quality. The non-invasive nature of the latest implants significantly reduces surgical risks while maintaining high fidelity signal capture."#,
        author: "NeuroTech Lab",
        date: (2025, 1, 8),
    },
    Sample {
        id: "4",
        title: "Room-Temperature Quantum Computing Achieved",
        category: "Quantum Computing",
        excerpt: "Scientists demonstrate stable quantum states at 20°C, eliminating need for expensive cooling systems.",
        content: r#"A team of physicists has achieved what many considered impossible: maintaining quantum coherence at room temperature for over 100 microseconds. This breakthrough could democratize access to quantum computing by eliminating cryogenic cooling requirements.

The key innovation involves topological qubits protected by exotic phases of matter that are inherently resistant to thermal noise. These qubits maintain their quantum properties even at ambient temperatures, though error rates remain slightly higher than supercooled systems.

The technology uses readily available materials and standard fabrication techniques, potentially reducing quantum computer costs by 90%. Early prototypes demonstrate successful execution of quantum algorithms with 50 qubits at room temperature."#,
        author: "Quantum Institute",
        date: (2025, 1, 5),
    },
    Sample {
        id: "5",
        title: "CRISPR 3.0 Enables Precise Multi-Gene Editing",
        category: "Biotechnology",
        excerpt: "New gene editing platform allows simultaneous modification of dozens of genes with 99.9% accuracy.",
        content: r#"The third generation of CRISPR technology enables unprecedented precision in genetic engineering. Researchers can now edit multiple genes simultaneously while maintaining near-perfect accuracy and minimal off-target effects.

The system uses an advanced guide RNA design that can target dozens of genomic locations in a single treatment. AI-powered prediction models ensure edits occur only at intended sites, with extensive validation showing less than 0.01% off-target activity.

Clinical applications are already in development for hereditary diseases requiring multiple gene corrections. The technology's safety profile and efficiency make it a strong candidate for treating complex genetic disorders that were previously considered untreatable."#,
        author: "BioTech Research",
        date: (2025, 1, 3),
    },
    Sample {
        id: "6",
        title: "Neuromorphic Chips Surpass GPU Efficiency 100x",
        category: "AI",
        excerpt: "Brain-inspired processors achieve breakthrough energy efficiency for AI workloads.",
        content: r#"A new generation of neuromorphic processors mimics biological neural networks to achieve remarkable energy efficiency. These chips process AI workloads using 100 times less power than conventional GPUs while maintaining comparable performance.

The architecture uses spiking neural networks and analog computing to process information more like biological brains. Event-driven computation means the chips only consume power when processing information, dramatically reducing idle power consumption.

Early deployments in edge AI applications show the chips running complex vision models for weeks on battery power. The technology could enable sophisticated AI in everything from smartphones to autonomous drones without the current power limitations."#,
        author: "Chip Architecture Lab",
        date: (2025, 1, 1),
    },
];

/// The bundled sample posts, newest first, with their original ids and dates.
pub fn sample_posts() -> Vec<Post> {
    SAMPLES
        .iter()
        .map(|sample| {
            let (y, m, d) = sample.date;
            let created_at = NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
                .unwrap_or_else(Utc::now);

            let mut post = Post::new(
                sample.id,
                PostDraft {
                    title: sample.title.to_string(),
                    category: Some(sample.category.to_string()),
                    excerpt: sample.excerpt.to_string(),
                    content: sample.content.to_string(),
                    author: sample.author.to_string(),
                },
            );
            post.created_at = created_at;
            post.updated_at = created_at;
            post
        })
        .collect()
}
