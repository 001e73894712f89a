//! 宣传首页
//!
//! 纯静态落地页：卖点、功能清单、用户评价、定价。所有跳转
//! 都指向登录 / 注册。

use leptos::prelude::*;
use pathprogress_shared::date;

use crate::web::router::Link;

struct Highlight {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

const STRUCTURE_HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        icon: "↗",
        title: "Define Clear Paths",
        description: "Structure your learning or projects into coherent, easy-to-follow paths and see the bigger picture.",
    },
    Highlight {
        icon: "☰",
        title: "Break into Sections",
        description: "Divide complex paths into manageable modules and keep momentum without feeling overwhelmed.",
    },
    Highlight {
        icon: "✔",
        title: "Complete Actionable Tasks",
        description: "Each section includes precise tasks so you can track every win and celebrate steady progress.",
    },
];

const KEY_FEATURES: &[&str] = &[
    "Intuitive drag-and-drop interface for path creation",
    "Collaborative tools for team learning and projects",
    "Integrated resource library for quick access",
    "Performance analytics and insights",
    "Real-time progress tracking dashboards",
    "Customizable templates for various industries",
    "Automated reminders and deadline management",
    "Secure cloud storage and synchronization",
];

struct Testimonial {
    quote: &'static str,
    name: &'static str,
    title: &'static str,
}

const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "PathProgress transformed how my team approaches project management. Complex workflows now feel incredibly simple.",
        name: "Sarah Chen",
        title: "Project Manager, Innovate Solutions",
    },
    Testimonial {
        quote: "As an educator, I struggled to keep students engaged. PathProgress dramatically improved comprehension and completion rates.",
        name: "Dr. Alex Johnson",
        title: "Professor of Data Science",
    },
    Testimonial {
        quote: "Navigating career development was daunting. PathProgress broke everything into achievable steps. Highly recommended!",
        name: "Maria Rodriguez",
        title: "Software Developer, TechCorp",
    },
];

struct PricingPlan {
    name: &'static str,
    price: &'static str,
    description: &'static str,
    perks: &'static [&'static str],
    cta: &'static str,
}

const PRICING_PLANS: &[PricingPlan] = &[
    PricingPlan {
        name: "Basic Plan",
        price: "$9",
        description: "Unlimited paths & sections with standard support.",
        perks: &[
            "Unlimited Paths & Sections",
            "Up to 5 collaborators",
            "Basic progress tracking",
            "Standard support",
        ],
        cta: "Start Basic",
    },
    PricingPlan {
        name: "Pro Plan",
        price: "$29",
        description: "Everything in Basic plus advanced analytics and priority service.",
        perks: &[
            "All Basic features",
            "Unlimited collaborators",
            "Advanced analytics",
            "Priority support",
            "Custom branding",
        ],
        cta: "Go Pro",
    },
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="landing">
            <header class="top-nav">
                <div class="brand">"PathProgress"</div>
                <div class="nav-actions">
                    <Link to="/login" class="ghost-link-button">"Login"</Link>
                    <Link to="/register" class="primary-link-button">"Sign Up"</Link>
                </div>
            </header>

            <main>
                <section class="hero">
                    <div class="hero-copy">
                        <p class="eyebrow">"PathProgress"</p>
                        <h1>"Navigate your learning journey with clarity and purpose."</h1>
                        <p>
                            "Build roadmaps, break them into sections, and stay consistent with \
                             intuitive progress tracking tailored for modern learners and teams."
                        </p>
                        <div class="hero-ctas">
                            <Link to="/register" class="primary-button large link-reset">"Get Started"</Link>
                            <Link to="/login" class="ghost-button large link-reset">"Login"</Link>
                        </div>
                    </div>
                    <div class="hero-visual">
                        <div class="floating-card">"Visual dashboards"</div>
                        <div class="floating-card secondary">"Automated reminders"</div>
                        <div class="floating-card tertiary">"Team insights"</div>
                    </div>
                </section>

                <section class="structure-section">
                    <h2>"Structure Your Progress"</h2>
                    <div class="structure-grid">
                        {STRUCTURE_HIGHLIGHTS
                            .iter()
                            .map(|item| {
                                view! {
                                    <article class="structure-card">
                                        <div class="structure-icon">{item.icon}</div>
                                        <h3>{item.title}</h3>
                                        <p>{item.description}</p>
                                    </article>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>

                <section class="features">
                    <h2>"Key Features Designed for You"</h2>
                    <div class="feature-lists">
                        <ul>
                            {KEY_FEATURES[..4]
                                .iter()
                                .map(|feature| view! { <li>{*feature}</li> })
                                .collect_view()}
                        </ul>
                        <ul>
                            {KEY_FEATURES[4..]
                                .iter()
                                .map(|feature| view! { <li>{*feature}</li> })
                                .collect_view()}
                        </ul>
                    </div>
                </section>

                <section class="testimonials">
                    <h2>"What Our Users Say"</h2>
                    <div class="testimonial-grid">
                        {TESTIMONIALS
                            .iter()
                            .map(|item| {
                                view! {
                                    <article class="testimonial-card">
                                        <p class="quote">{format!("“{}”", item.quote)}</p>
                                        <div>
                                            <p class="name">{item.name}</p>
                                            <p class="title">{item.title}</p>
                                        </div>
                                    </article>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>

                <section class="pricing">
                    <h2>"Choose Your Ideal Plan"</h2>
                    <div class="pricing-grid">
                        {PRICING_PLANS
                            .iter()
                            .map(|plan| {
                                view! {
                                    <article class="pricing-card">
                                        <h3>{plan.name}</h3>
                                        <p class="price">{plan.price}<span>"/month"</span></p>
                                        <p class="plan-desc">{plan.description}</p>
                                        <ul>
                                            {plan
                                                .perks
                                                .iter()
                                                .map(|perk| view! { <li>{*perk}</li> })
                                                .collect_view()}
                                        </ul>
                                        <Link to="/register" class="primary-button full-width link-reset">
                                            {plan.cta}
                                        </Link>
                                    </article>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            </main>

            <footer class="footer">
                <div>
                    <span>{format!("© {} PathProgress. All rights reserved.", date::current_year())}</span>
                </div>
                <nav>
                    <a>"About Us"</a>
                    <a>"Contact"</a>
                    <a>"Privacy Policy"</a>
                    <a>"Terms of Service"</a>
                </nav>
            </footer>
        </div>
    }
}
