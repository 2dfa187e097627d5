use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::collections::BTreeMap;

use gradcheck_core::engine::evaluate;
use gradcheck_core::model::{
    Category, CourseRef, CurriculumEra, DiscontinuedCourse, GeneralEducationRules, OneOfGroup,
    ReplacementRule, ReplacementScope, RequirementCatalog, TakenCourse,
};
use gradcheck_core::overflow::redistribute;

fn make_catalog(rule_count: usize) -> RequirementCatalog {
    let mut credit_quota = BTreeMap::new();
    for cat in Category::ALL {
        credit_quota.insert(cat, 15);
    }

    let mut common = Vec::new();
    let mut rules = Vec::new();
    for i in 0..rule_count {
        let name = format!("Retired Course {i}");
        common.push(CourseRef {
            name: name.clone(),
            credits: 3,
            group_id: None,
        });
        rules.push(ReplacementRule {
            discontinued: DiscontinuedCourse {
                name,
                category: Category::DepartmentCommon,
                credits: 3,
            },
            replacements: vec![format!("Modern Course {i}"), format!("Alt Course {i}")],
            scope: ReplacementScope::Department,
        });
    }

    let mut category_courses = BTreeMap::new();
    category_courses.insert(Category::DepartmentCommon, common);

    RequirementCatalog {
        department: "Software".into(),
        track: "general".into(),
        cohort: 2021,
        era: CurriculumEra::Legacy,
        total_credits: 130,
        credit_quota,
        category_courses,
        general_education: GeneralEducationRules {
            one_of_groups: (0..4)
                .map(|i| OneOfGroup {
                    group_id: format!("group-{i}"),
                    courses: vec![format!("Option {i}A"), format!("Option {i}B")],
                    credits: Some(2),
                })
                .collect(),
            individual_required: vec!["Chapel".into()],
        },
        replacement_rules: rules,
        competency: Default::default(),
    }
}

fn make_transcript(course_count: usize) -> Vec<TakenCourse> {
    (0..course_count)
        .map(|i| TakenCourse {
            category: Category::ALL[i % 7],
            name: if i % 5 == 0 {
                format!("Modern Course {}", i / 5)
            } else {
                format!("Course {i}")
            },
            credits: 3,
            group_id: None,
            competency_tag: (i % 3 == 0).then(|| format!("{}", i % 4)),
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for (courses, rules) in [(20, 5), (100, 20), (500, 50)] {
        let catalog = make_catalog(rules);
        let transcript = make_transcript(courses);
        group.bench_function(format!("courses={courses},rules={rules}"), |b| {
            b.iter(|| evaluate(black_box(&catalog), black_box(&transcript)))
        });
    }

    group.finish();
}

fn bench_redistribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("redistribute");

    let quotas: BTreeMap<Category, u32> = Category::ALL.iter().map(|&c| (c, 12)).collect();
    let credits: BTreeMap<Category, u32> = Category::ALL.iter().map(|&c| (c, 20)).collect();

    group.bench_function("all_overflowing", |b| {
        b.iter(|| {
            redistribute(
                black_box(&credits),
                black_box(&quotas),
                CurriculumEra::Legacy,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_redistribute);
criterion_main!(benches);
