//! Age-bracketed year counts shared by the calculators.

/// Statutory compensation years for the victim: 20 below 60, one year less per year
/// of age from 60, and a floor of 5 from 75.
pub fn compensation_years(age: u32) -> u32 {
    match age {
        0..=59 => 20,
        60..=74 => 20 - (age - 60),
        _ => 5,
    }
}

/// Narrative form of [`compensation_years`] naming the applicable bracket.
pub fn compensation_years_description(age: u32) -> String {
    let years = compensation_years(age);
    match age {
        0..=59 => format!("{years}年"),
        60..=74 => format!("{years}年（60周岁以上每增加一岁减少一年）"),
        _ => format!("{years}年（75周岁以上按5年计算）"),
    }
}

/// Years of living expense owed to one dependent, with the bracket narrative.
pub fn dependent_years(age: u32) -> (u32, String) {
    match age {
        0..=17 => (18 - age, format!("不满18周岁，按(18-{age})年计算")),
        18..=59 => (20, "18-60周岁（无劳动能力），按20年计算".to_string()),
        60..=74 => {
            let years = 20 - (age - 60);
            (years, format!("60-75周岁，按[20-({age}-60)]={years}年计算"))
        }
        _ => (5, "75周岁以上，按5年计算".to_string()),
    }
}
