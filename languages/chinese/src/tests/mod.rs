
use crate::builder::{DictionaryBuilder, EntrySource};
use crate::dictionary::Dictionary;
use crate::entry::Entry;
use crate::result::SearchResult;

fn source(simplified: &str, traditional: &str, pinyin: &str, definitions: &[&str]) -> EntrySource {
    EntrySource {
        simplified: simplified.to_string(),
        traditional: traditional.to_string(),
        pinyin: pinyin.to_string(),
        formatted_pinyin: None,
        definitions: definitions.iter().map(|d| d.to_string()).collect(),
        examples: vec![],
    }
}

fn fixture_builder() -> DictionaryBuilder {
    let mut builder = DictionaryBuilder::new();
    let we_speak = builder.add_example_sentence("我们会说法语。", "We can speak French.");

    builder
        .add_entry(source("我", "我", "wo3", &["I", "me", "my"]))
        .add_entry(EntrySource {
            examples: vec![we_speak],
            ..source("我们", "我們", "wo3 men5", &["we", "us", "ourselves", "our"])
        })
        .add_entry(source("们", "們", "men5", &["plural marker for pronouns"]))
        .add_entry(source("你好", "你好", "ni3 hao3", &["hello", "hi"]))
        .add_entry(source("会", "會", "hui4", &["can", "to be possible"]))
        .add_entry(source("会", "會", "hui4", &["to meet", "meeting"]))
        .add_entry(source("法语", "法語", "Fa3 yu3", &["French (language)"]))
        .add_entry(source("广州", "廣州", "Guang3 zhou1", &["Guangzhou, capital of Guangdong"]))
        .add_entry(source(
            "羊城",
            "羊城",
            "Yang2 cheng2",
            &["Yangcheng, a nickname for 廣州|广州[Guang3 zhou1]"],
        ))
        .add_entry(source("女", "女", "nu:3", &["female", "woman"]))
        .add_entry(source("绿", "綠", "lu:4", &["green"]))
        .add_entry(source("咖啡", "咖啡", "ka1 fei1", &["coffee (loanword)", "café"]))
        .add_entry(source("T恤", "T恤", "T xu4", &["T-shirt"]))
        .add_entry(source("你", "你", "ni3", &["you (informal)"]))
        .add_entry(source("好", "好", "hao3", &["good", "well"]))
        .add_entry(source("阿", "阿", "a1", &["prefix used before names"]))
        .add_entry(source("额", "額", "e2", &["forehead"]));

    builder
}

fn fixture_bytes() -> Vec<u8> {
    fixture_builder().to_bytes().unwrap()
}

fn fixture() -> Dictionary {
    Dictionary::from_reader(fixture_bytes().as_slice()).unwrap()
}

fn names<'e>(results: &[SearchResult<'e>]) -> Vec<&'e str> {
    results.iter().map(|r| r.entry.simplified.as_str()).collect()
}

fn contains(results: &[SearchResult<'_>], entry: &Entry) -> bool {
    results.iter().any(|r| std::ptr::eq(r.entry, entry))
}
