fn main() {
    note_dash::game::run();
}
