fn main() {
    course_selection::cli::run();
}
