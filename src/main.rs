fn main() {
    rapid_fire::game::run();
}
