//! Static content shown when the content backend has nothing to offer.
//!
//! The archives fall back to these tables when a fetch fails or the
//! backend returns an empty collection, so a fresh deployment still
//! renders something.
//!
//! The about page's experience and education history only ever comes from
//! here.

use crate::models::{Education, Experience, FallbackBlogPost, FallbackProject};

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_string()).collect()
}

pub fn projects() -> Vec<FallbackProject> {
    vec![
        FallbackProject {
            title: "AI Chatbot Application".to_string(),
            description: "A conversational chatbot application built with Next.js and OpenAI. \
                It leverages advanced NLP techniques for context-aware responses."
                .to_string(),
            date: "Nov 2024".to_string(),
            stars: Some(0),
            image: Some("/projects/chatbot.png".to_string()),
            tags: Some(tags(&["Next.js", "OpenAI", "TypeScript"])),
            link: Some("https://github.com/yourusername/chatbot".to_string()),
        },
        FallbackProject {
            title: "Portfolio Website".to_string(),
            description: "A modern, responsive personal portfolio website built with Next.js \
                and Sanity.io. It showcases projects and blog posts."
                .to_string(),
            date: "Oct 2024".to_string(),
            stars: Some(0),
            image: Some("/projects/portfolio.png".to_string()),
            tags: Some(tags(&["Next.js", "Sanity", "Tailwind CSS"])),
            link: Some("https://github.com/yourusername/portfolio".to_string()),
        },
    ]
}

pub fn blog_posts() -> Vec<FallbackBlogPost> {
    vec![
        FallbackBlogPost {
            title: "Getting Started with Next.js 15".to_string(),
            description: "Learn how to build modern web applications with Next.js 15, \
                including the new App Router and Server Components."
                .to_string(),
            date: "Mar 18, 2024".to_string(),
            views: Some(1250),
            tags: tags(&["nextjs", "react", "web development"]),
            slug: "getting-started-nextjs-15".to_string(),
        },
        FallbackBlogPost {
            title: "Building AI Applications with OpenAI".to_string(),
            description: "A comprehensive guide to integrating OpenAI's API into your \
                applications for intelligent features."
                .to_string(),
            date: "Feb 27, 2024".to_string(),
            views: Some(890),
            tags: tags(&["ai", "openai", "machine learning"]),
            slug: "building-ai-applications-openai".to_string(),
        },
    ]
}

pub fn experiences() -> Vec<Experience> {
    vec![
        Experience {
            company: "Company Name".to_string(),
            role: "AI/ML Engineer".to_string(),
            period: "Jan 2024 - Present".to_string(),
            kind: "Full-time".to_string(),
            location: None,
            logo: Some("/logos/company1.png".to_string()),
        },
        Experience {
            company: "Previous Company".to_string(),
            role: "Software Engineer".to_string(),
            period: "Jun 2022 - Dec 2023".to_string(),
            kind: "Full-time".to_string(),
            location: None,
            logo: Some("/logos/company2.png".to_string()),
        },
    ]
}

pub fn education() -> Vec<Education> {
    vec![
        Education {
            school: "Northeastern University".to_string(),
            degree: "Master's degree".to_string(),
            field: "Analytics".to_string(),
            period: "Apr 2025 - Jul 2027".to_string(),
            location: Some("Boston, Massachusetts, United States".to_string()),
            logo: None,
            gpa: Some("4.0".to_string()),
        },
        Education {
            school: "International Institute of Information Technology Bangalore".to_string(),
            degree: "PG Diploma".to_string(),
            field: "Data Science".to_string(),
            period: "2023 - 2024".to_string(),
            location: Some("Bangalore, India".to_string()),
            logo: None,
            gpa: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::slugify;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_slugs_are_unique() {
        let projects: HashSet<String> = projects().iter().map(|p| slugify(&p.title)).collect();
        assert_eq!(projects.len(), super::projects().len());
        let posts: HashSet<String> = blog_posts().into_iter().map(|p| p.slug).collect();
        assert_eq!(posts.len(), blog_posts().len());
    }

    #[test]
    fn test_about_history_is_newest_first() {
        let experiences = experiences();
        assert_eq!(experiences.len(), 2);
        assert!(experiences[0].period.ends_with("Present"));

        let education = education();
        assert_eq!(education[0].school, "Northeastern University");
        assert_eq!(education[0].gpa.as_deref(), Some("4.0"));
        assert!(education[1].gpa.is_none());
    }
}
