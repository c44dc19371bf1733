use course_extractor::config::Config;
use course_extractor::core::CourseExtractor;
use course_extractor::model::ExtractionResult;
use course_extractor::utils::input::input_or;

const DEFAULT_URL: &str = "https://www.coursera.org/courses";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    course_extractor::logging::init();

    let url = input_or("Enter a URL to test: ", DEFAULT_URL)?;
    let extractor = CourseExtractor::new(&Config::default())?;

    println!("\nProcessing: {}", url);
    match extractor.extract_course_info(&url).await {
        ExtractionResult::Success { courses, courses_found, .. } => {
            println!("Success! Found {} courses", courses_found);
            if courses.is_empty() {
                println!("   No courses found on this page");
            }
            for (i, course) in courses.iter().take(3).enumerate() {
                println!("   {}. {}", i + 1, course.course_name);
                println!("      Institute: {}", course.institute_name);
                println!("      Format: {}", course.format);
                println!("      Duration: {}", course.duration);
            }
        }
        ExtractionResult::Failure { error, .. } => {
            println!("Failed: {}", error);
        }
    }
    Ok(())
}
