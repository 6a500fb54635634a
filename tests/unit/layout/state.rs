use super::*;

fn feed(
    state: &mut RenderState,
    text: &str,
    break_on: impl Fn(&RenderState, char) -> bool,
) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    for ch in text.chars() {
        state.push_char(ch);
        if break_on(state, ch)
            && let LineCommit::PageFull(page) = state.commit_line()
        {
            pages.push(page);
        }
    }
    pages
}

#[test]
fn commit_moves_line_and_advances() {
    let mut s = RenderState::new(3);
    s.push_char('a');
    s.push_char('\n');
    assert_eq!(s.commit_line(), LineCommit::SamePage);
    assert_eq!(s.completed(), &["a\n".to_string()]);
    assert_eq!(s.in_progress(), "");
    assert_eq!(s.line_index(), 1);
}

#[test]
fn filling_last_slot_returns_page_and_resets() {
    let mut s = RenderState::new(2);
    s.push_char('x');
    assert_eq!(s.commit_line(), LineCommit::SamePage);
    s.push_char('y');
    assert_eq!(
        s.commit_line(),
        LineCommit::PageFull(vec!["x".to_string(), "y".to_string()])
    );
    assert_eq!(s.line_index(), 0);
    assert!(s.completed().is_empty());
}

#[test]
fn line_index_stays_below_max_lines() {
    let mut s = RenderState::new(3);
    for ch in "a\nb\nc\nd\ne\nf\ng".chars() {
        s.push_char(ch);
        if ch == '\n' {
            s.commit_line();
        }
        assert!(s.line_index() < 3);
    }
}

#[test]
fn pages_reconstruct_consumed_text() {
    let text = "one\ntwo\nthree\nfour\nfive";
    let mut s = RenderState::new(2);
    let mut pages = feed(&mut s, text, |_, ch| ch == '\n');
    s.finish();
    pages.push(s.completed().to_vec());

    assert_eq!(
        pages,
        vec![
            vec!["one\n".to_string(), "two\n".to_string()],
            vec!["three\n".to_string(), "four\n".to_string()],
            vec!["five".to_string()],
        ]
    );
    let rebuilt: String = pages.iter().flatten().map(String::as_str).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn finish_ignores_empty_line() {
    let mut s = RenderState::new(4);
    s.push_char('z');
    s.push_char('\n');
    s.commit_line();
    s.finish();
    assert_eq!(s.completed(), &["z\n".to_string()]);
}

#[test]
fn width_style_breaks_split_without_markers() {
    let mut s = RenderState::new(10);
    let pages = feed(&mut s, "abcdefg", |st, _| st.in_progress().len() == 3);
    assert!(pages.is_empty());
    s.finish();
    assert_eq!(s.completed(), &["abc", "def", "g"]);
}
