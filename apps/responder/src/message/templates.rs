// Text of the application message. Wording is policy, not mechanism:
// any template works as long as it keeps the {vacancy} and {contact} slots.

pub const SALUTATIONS: &[&str] = &["Здравствуйте", "Доброго времени суток", "Приветствую"];

pub const APPLICATION_TEMPLATE: &str = "{greeting}, я бы хотел чтобы Вы рассмотрели мою \
    кандидатуру в качестве {vacancy}. Если Вас заинтересовало мое резюме, пожалуйста \
    свяжитесь со мной с помощью {contact}, т.к. уведомления с сайта часто теряются среди \
    множества писем в ящике. Спасибо.";
